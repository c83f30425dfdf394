//! Application layer containing the business rules.
//!
//! `EmployeeDirectory` validates employee records, `PayrollEngine` computes
//! and manages payroll on top of it, and `DepartmentRegistry` keeps the
//! department list. Each service receives its store at construction.

pub mod departments;
pub mod directory;
pub mod payroll_engine;
