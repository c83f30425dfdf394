use super::directory::EmployeeDirectory;
use crate::domain::department::{Department, DepartmentHeadcount};
use crate::domain::ports::DepartmentStoreBox;
use crate::error::{Result, StaffrollError};
use std::sync::Arc;
use tracing::info;

/// Plain CRUD over departments plus the headcount report.
///
/// Deleting a department does not touch employees that reference it.
pub struct DepartmentRegistry {
    store: DepartmentStoreBox,
    directory: Arc<EmployeeDirectory>,
}

impl DepartmentRegistry {
    pub fn new(store: DepartmentStoreBox, directory: Arc<EmployeeDirectory>) -> Self {
        Self { store, directory }
    }

    pub async fn create(&self, department: Department) -> Result<i64> {
        if department.name.trim().is_empty() {
            return Err(StaffrollError::validation("Department name is required"));
        }
        let id = self.store.insert(department).await?;
        info!(department_id = id, "department created");
        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.store.get(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Department>> {
        self.store.list_all().await
    }

    pub async fn update(&self, department: Department) -> Result<bool> {
        if department.id <= 0 {
            return Err(StaffrollError::validation("Invalid department ID"));
        }
        if department.name.trim().is_empty() {
            return Err(StaffrollError::validation("Department name is required"));
        }
        self.store.update(department).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        if id <= 0 {
            return Err(StaffrollError::validation("Invalid department ID"));
        }
        let removed = self.store.delete(id).await?;
        info!(department_id = id, removed, "department delete");
        Ok(removed)
    }

    /// Employee count for every department, in department id order.
    pub async fn headcount(&self) -> Result<Vec<DepartmentHeadcount>> {
        let mut report = Vec::new();
        for department in self.store.list_all().await? {
            let employees = self.directory.list_by_department(department.id).await?;
            report.push(DepartmentHeadcount {
                department_id: department.id,
                name: department.name,
                employees: employees.len(),
            });
        }
        Ok(report)
    }
}
