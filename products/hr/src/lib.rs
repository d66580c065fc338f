//! HR module: employee records and the service that manages them.

mod error;
mod model;
mod repository;
mod service;

pub use error::{HrError, HrResult};
pub use model::{Employee, EmployeeInput};
pub use repository::EmployeeRepository;
pub use service::{EmployeeService, generate_employee_code};
