use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    Name,
    Email,
    JobTitle,
    PhoneNumber,
    ImageUrl,
    EmployeeCode,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employee::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employee::Name).string_len(255))
                    .col(ColumnDef::new(Employee::Email).string_len(320))
                    .col(ColumnDef::new(Employee::JobTitle).string_len(255))
                    .col(ColumnDef::new(Employee::PhoneNumber).string_len(64))
                    .col(ColumnDef::new(Employee::ImageUrl).text())
                    .col(ColumnDef::new(Employee::EmployeeCode).string_len(64).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employee_code")
                    .table(Employee::Table)
                    .col(Employee::EmployeeCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employee::Table).if_exists().to_owned())
            .await
    }
}
