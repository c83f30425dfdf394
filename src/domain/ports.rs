use super::department::Department;
use super::employee::Employee;
use super::payroll::Payroll;
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Storage contract for employee records.
///
/// `insert` assigns the id and timestamps; list operations return records in
/// ascending id order.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn insert(&self, employee: Employee) -> Result<i64>;
    async fn get(&self, id: i64) -> Result<Option<Employee>>;
    async fn list_all(&self) -> Result<Vec<Employee>>;
    async fn list_by_department(&self, department_id: i64) -> Result<Vec<Employee>>;
    async fn update(&self, employee: Employee) -> Result<bool>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>>;
}

/// Storage contract for payroll records.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    async fn insert(&self, payroll: Payroll) -> Result<i64>;
    async fn get(&self, id: i64) -> Result<Option<Payroll>>;
    /// Newest record first (descending id).
    async fn list_all(&self) -> Result<Vec<Payroll>>;
    /// Most recent pay period first.
    async fn list_by_employee(&self, employee_id: i64) -> Result<Vec<Payroll>>;
    /// Records whose period lies entirely within `[start, end]`, most recent period first.
    async fn list_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Payroll>>;
    async fn update(&self, payroll: Payroll) -> Result<bool>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn mark_paid(&self, id: i64, date: NaiveDate) -> Result<bool>;
}

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    async fn insert(&self, department: Department) -> Result<i64>;
    async fn get(&self, id: i64) -> Result<Option<Department>>;
    async fn list_all(&self) -> Result<Vec<Department>>;
    async fn update(&self, department: Department) -> Result<bool>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Connectivity probe run once by the composition root before any command.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn test_connection(&self) -> bool;
}

pub type EmployeeStoreBox = Box<dyn EmployeeStore>;
pub type PayrollStoreBox = Box<dyn PayrollStore>;
pub type DepartmentStoreBox = Box<dyn DepartmentStore>;
pub type StoreHealthBox = Box<dyn StoreHealth>;
