use sea_orm::entity::prelude::*;

/// `id` and `employee_code` are assigned on insert and never rewritten.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
    #[sea_orm(unique)]
    pub employee_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
