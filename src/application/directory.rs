use crate::domain::employee::Employee;
use crate::domain::ports::EmployeeStoreBox;
use crate::error::{Result, StaffrollError};
use tracing::{debug, info};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validates and exposes employee records.
///
/// Every mutation is checked before the store is touched, so a rejected call
/// leaves no partial state behind.
pub struct EmployeeDirectory {
    store: EmployeeStoreBox,
}

impl EmployeeDirectory {
    pub fn new(store: EmployeeStoreBox) -> Self {
        Self { store }
    }

    /// Persists a new employee and returns the id assigned by the store.
    pub async fn create(&self, employee: Employee) -> Result<i64> {
        if is_blank(&employee.first_name) {
            return Err(StaffrollError::validation("First name is required"));
        }
        if is_blank(&employee.last_name) {
            return Err(StaffrollError::validation("Last name is required"));
        }
        if is_blank(&employee.email) {
            return Err(StaffrollError::validation("Email is required"));
        }
        if !employee.salary.is_positive() {
            return Err(StaffrollError::validation("Salary must be greater than 0"));
        }

        let id = self.store.insert(employee).await?;
        info!(employee_id = id, "employee created");
        Ok(id)
    }

    /// Replaces every field of an existing employee. Returns `false` when no
    /// record with that id exists.
    pub async fn update(&self, employee: Employee) -> Result<bool> {
        if employee.id <= 0 {
            return Err(StaffrollError::validation("Invalid employee ID"));
        }
        if is_blank(&employee.first_name) {
            return Err(StaffrollError::validation("First name is required"));
        }
        if is_blank(&employee.last_name) {
            return Err(StaffrollError::validation("Last name is required"));
        }
        if !employee.salary.is_positive() {
            return Err(StaffrollError::validation("Salary must be greater than 0"));
        }

        let id = employee.id;
        let updated = self.store.update(employee).await?;
        info!(employee_id = id, updated, "employee update");
        Ok(updated)
    }

    /// Payroll rows that reference the employee are left in place.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        if id <= 0 {
            return Err(StaffrollError::validation("Invalid employee ID"));
        }
        let removed = self.store.delete(id).await?;
        info!(employee_id = id, removed, "employee delete");
        Ok(removed)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        debug!(employee_id = id, "employee lookup");
        self.store.get(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Employee>> {
        self.store.list_all().await
    }

    pub async fn list_by_department(&self, department_id: i64) -> Result<Vec<Employee>> {
        debug!(department_id, "employees by department");
        self.store.list_by_department(department_id).await
    }

    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>> {
        if is_blank(fragment) {
            return Err(StaffrollError::validation("Search term is required"));
        }
        let mut matches = self.store.search_by_name(fragment.trim()).await?;
        matches.sort_by_key(|e| e.id);
        debug!(fragment, matches = matches.len(), "employee search");
        Ok(matches)
    }
}
