use crate::domain::department::Department;
use crate::domain::employee::Employee;
use crate::domain::payroll::Payroll;
use crate::domain::ports::{DepartmentStore, EmployeeStore, PayrollStore, StoreHealth};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Rows keyed by id plus the next id to hand out. Ids start at 1 and are never reused.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// A thread-safe in-memory store for employees.
///
/// Uses `Arc<RwLock<..>>` so clones share the same rows. Ideal for testing or
/// single-run sessions where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryEmployeeStore {
    table: Arc<RwLock<Table<Employee>>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn insert(&self, mut employee: Employee) -> Result<i64> {
        let mut table = self.table.write().await;
        let id = table.allocate();
        let now = Utc::now();
        employee.id = id;
        employee.created_at = Some(now);
        employee.updated_at = Some(now);
        table.rows.insert(id, employee);
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Employee>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Employee>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn list_by_department(&self, department_id: i64) -> Result<Vec<Employee>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|e| e.department_id == Some(department_id))
            .cloned()
            .collect())
    }

    async fn update(&self, mut employee: Employee) -> Result<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&employee.id) {
            Some(existing) => {
                employee.created_at = existing.created_at;
                employee.updated_at = Some(Utc::now());
                *existing = employee;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|e| e.name_matches(fragment))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StoreHealth for InMemoryEmployeeStore {
    async fn test_connection(&self) -> bool {
        true
    }
}

/// A thread-safe in-memory store for payroll records.
#[derive(Default, Clone)]
pub struct InMemoryPayrollStore {
    table: Arc<RwLock<Table<Payroll>>>,
}

impl InMemoryPayrollStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_period_first(records: &mut [Payroll]) {
    records.sort_by(|a, b| {
        b.period_start
            .cmp(&a.period_start)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl PayrollStore for InMemoryPayrollStore {
    async fn insert(&self, mut payroll: Payroll) -> Result<i64> {
        let mut table = self.table.write().await;
        let id = table.allocate();
        payroll.id = id;
        payroll.created_at = Some(Utc::now());
        table.rows.insert(id, payroll);
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Payroll>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Payroll>> {
        let table = self.table.read().await;
        Ok(table.rows.values().rev().cloned().collect())
    }

    async fn list_by_employee(&self, employee_id: i64) -> Result<Vec<Payroll>> {
        let table = self.table.read().await;
        let mut records: Vec<Payroll> = table
            .rows
            .values()
            .filter(|p| p.employee_id == employee_id)
            .cloned()
            .collect();
        newest_period_first(&mut records);
        Ok(records)
    }

    async fn list_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Payroll>> {
        let table = self.table.read().await;
        let mut records: Vec<Payroll> = table
            .rows
            .values()
            .filter(|p| p.period_start >= start && p.period_end <= end)
            .cloned()
            .collect();
        newest_period_first(&mut records);
        Ok(records)
    }

    async fn update(&self, mut payroll: Payroll) -> Result<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&payroll.id) {
            Some(existing) => {
                payroll.created_at = existing.created_at;
                *existing = payroll;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn mark_paid(&self, id: i64, date: NaiveDate) -> Result<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(existing) => {
                existing.mark_paid(date);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default, Clone)]
pub struct InMemoryDepartmentStore {
    table: Arc<RwLock<Table<Department>>>,
}

impl InMemoryDepartmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DepartmentStore for InMemoryDepartmentStore {
    async fn insert(&self, mut department: Department) -> Result<i64> {
        let mut table = self.table.write().await;
        let id = table.allocate();
        department.id = id;
        department.created_at = Some(Utc::now());
        table.rows.insert(id, department);
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Department>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Department>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn update(&self, mut department: Department) -> Result<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&department.id) {
            Some(existing) => {
                department.created_at = existing.created_at;
                *existing = department;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
