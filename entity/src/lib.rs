//! sea-orm entities for the employee manager schema.

pub mod employee;
