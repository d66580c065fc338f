use entity::employee;
use platform_db::DbPool;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DbErr, EntityTrait, QueryOrder, TransactionTrait,
};

/// Store access for employee rows, keyed by the numeric id.
#[derive(Clone, Debug)]
pub struct EmployeeRepository {
    pool: DbPool,
}

impl EmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Inserts when the model carries no id, otherwise updates that row.
    /// Updating a missing row yields `DbErr::RecordNotUpdated`.
    pub async fn save(&self, model: employee::ActiveModel) -> Result<employee::Model, DbErr> {
        if matches!(model.id, ActiveValue::NotSet) {
            model.insert(&self.pool).await
        } else {
            model.update(&self.pool).await
        }
    }

    pub async fn find_all(&self) -> Result<Vec<employee::Model>, DbErr> {
        employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<employee::Model>, DbErr> {
        employee::Entity::find_by_id(id).one(&self.pool).await
    }

    /// Returns the number of rows removed.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, DbErr> {
        let txn = self.pool.begin().await?;
        let res = employee::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected)
    }
}
