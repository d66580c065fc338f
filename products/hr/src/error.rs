use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("Employee with id {0} was not found")]
    NotFound(i64),
    #[error("employee id is required")]
    MissingId,
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub type HrResult<T> = Result<T, HrError>;
