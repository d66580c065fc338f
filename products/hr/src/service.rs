use platform_db::DbPool;
use sea_orm::DbErr;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{Employee, EmployeeInput, EmployeeRepository, HrError, HrResult};

/// Opaque business identifier handed out once per employee.
pub fn generate_employee_code() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Clone, Debug)]
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            repo: EmployeeRepository::new(pool),
        }
    }

    /// Persists a new employee under a freshly generated code. Any id in the
    /// input is ignored.
    #[instrument(name = "hr.employees.create", skip_all)]
    pub async fn create(&self, input: EmployeeInput) -> HrResult<Employee> {
        let model = self
            .repo
            .save(input.into_new_model(generate_employee_code()))
            .await?;
        info!(id = model.id, code = %model.employee_code, "employee created");
        Ok(model.into())
    }

    #[instrument(name = "hr.employees.list", skip_all)]
    pub async fn find_all(&self) -> HrResult<Vec<Employee>> {
        let models = self.repo.find_all().await?;
        Ok(models.into_iter().map(Employee::from).collect())
    }

    #[instrument(name = "hr.employees.find", skip(self))]
    pub async fn find_by_id(&self, id: i64) -> HrResult<Employee> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Employee::from)
            .ok_or(HrError::NotFound(id))
    }

    /// Full overwrite of the mutable fields; id and code stay as stored.
    #[instrument(name = "hr.employees.update", skip_all, fields(id = ?input.id))]
    pub async fn update(&self, input: EmployeeInput) -> HrResult<Employee> {
        let id = input.id.ok_or(HrError::MissingId)?;
        match self.repo.save(input.into_update_model(id)).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(HrError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Succeeds whether or not a row with `id` existed.
    #[instrument(name = "hr.employees.delete", skip(self))]
    pub async fn delete(&self, id: i64) -> HrResult<()> {
        let removed = self.repo.delete_by_id(id).await?;
        if removed == 0 {
            debug!(id, "delete matched no employee");
        }
        Ok(())
    }
}
