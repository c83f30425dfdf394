use crate::domain::employee::{Employee, EmployeeStatus};
use crate::domain::money::Money;
use crate::error::{Result, StaffrollError};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;

/// One line of an employee import file. `status` defaults to ACTIVE.
#[derive(Debug, Deserialize)]
struct EmployeeRow {
    first_name: String,
    last_name: String,
    email: String,
    #[serde(default)]
    phone: String,
    hire_date: NaiveDate,
    #[serde(default)]
    job_title: String,
    #[serde(default)]
    department_id: Option<i64>,
    salary: Money,
    #[serde(default)]
    status: Option<EmployeeStatus>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        let mut employee = Employee::new(
            row.first_name,
            row.last_name,
            row.email,
            row.hire_date,
            row.salary,
        )
        .with_phone(row.phone)
        .with_job_title(row.job_title)
        .with_status(row.status.unwrap_or_default());
        employee.department_id = row.department_id;
        employee
    }
}

/// Reads employees from a CSV source.
///
/// Handles whitespace trimming and flexible record lengths. Rows are only
/// parsed here; field validation is the directory's job.
pub struct EmployeeReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EmployeeReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes rows, yielding one result per line.
    pub fn employees(self) -> impl Iterator<Item = Result<Employee>> {
        self.reader
            .into_deserialize::<EmployeeRow>()
            .map(|result| result.map(Employee::from).map_err(StaffrollError::from))
    }
}
