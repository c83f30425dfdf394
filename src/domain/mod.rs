//! Domain types and the storage ports the services depend on.

pub mod department;
pub mod employee;
pub mod money;
pub mod payroll;
pub mod ports;
