use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Department {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            created_at: None,
        }
    }
}

/// Number of employees referencing a department.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct DepartmentHeadcount {
    pub department_id: i64,
    pub name: String,
    pub employees: usize,
}
