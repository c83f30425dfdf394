use crate::domain::department::{Department, DepartmentHeadcount};
use crate::domain::employee::{Employee, EmployeeStatus};
use crate::domain::money::Money;
use crate::domain::payroll::{Payroll, PaymentStatus};
use crate::error::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct EmployeeRow<'a> {
    id: i64,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    hire_date: NaiveDate,
    job_title: &'a str,
    department_id: Option<i64>,
    salary: Money,
    status: EmployeeStatus,
}

impl<'a> From<&'a Employee> for EmployeeRow<'a> {
    fn from(e: &'a Employee) -> Self {
        Self {
            id: e.id,
            first_name: &e.first_name,
            last_name: &e.last_name,
            email: &e.email,
            phone: &e.phone,
            hire_date: e.hire_date,
            job_title: &e.job_title,
            department_id: e.department_id,
            salary: e.salary,
            status: e.status,
        }
    }
}

#[derive(Serialize)]
struct PayrollRow {
    id: i64,
    employee_id: i64,
    period_start: NaiveDate,
    period_end: NaiveDate,
    basic_salary: Money,
    bonus: Money,
    deductions: Money,
    net_salary: Money,
    payment_date: Option<NaiveDate>,
    payment_status: PaymentStatus,
}

impl From<&Payroll> for PayrollRow {
    fn from(p: &Payroll) -> Self {
        Self {
            id: p.id,
            employee_id: p.employee_id,
            period_start: p.period_start,
            period_end: p.period_end,
            basic_salary: p.basic_salary,
            bonus: p.bonus,
            deductions: p.deductions,
            net_salary: p.net_salary,
            payment_date: p.payment_date,
            payment_status: p.payment_status,
        }
    }
}

#[derive(Serialize)]
struct DepartmentRow<'a> {
    id: i64,
    name: &'a str,
    description: &'a str,
}

/// Writes listings as CSV with a header row.
///
/// Store-managed timestamps are left out so the output only depends on the
/// record contents.
pub struct RecordWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    pub fn write_employees<'a>(
        &mut self,
        employees: impl IntoIterator<Item = &'a Employee>,
    ) -> Result<()> {
        self.write_header(&[
            "id",
            "first_name",
            "last_name",
            "email",
            "phone",
            "hire_date",
            "job_title",
            "department_id",
            "salary",
            "status",
        ])?;
        for employee in employees {
            self.writer.serialize(EmployeeRow::from(employee))?;
        }
        self.flush()
    }

    pub fn write_payrolls<'a>(
        &mut self,
        payrolls: impl IntoIterator<Item = &'a Payroll>,
    ) -> Result<()> {
        self.write_header(&[
            "id",
            "employee_id",
            "period_start",
            "period_end",
            "basic_salary",
            "bonus",
            "deductions",
            "net_salary",
            "payment_date",
            "payment_status",
        ])?;
        for payroll in payrolls {
            self.writer.serialize(PayrollRow::from(payroll))?;
        }
        self.flush()
    }

    pub fn write_departments<'a>(
        &mut self,
        departments: impl IntoIterator<Item = &'a Department>,
    ) -> Result<()> {
        self.write_header(&["id", "name", "description"])?;
        for d in departments {
            self.writer.serialize(DepartmentRow {
                id: d.id,
                name: &d.name,
                description: &d.description,
            })?;
        }
        self.flush()
    }

    pub fn write_headcount<'a>(
        &mut self,
        report: impl IntoIterator<Item = &'a DepartmentHeadcount>,
    ) -> Result<()> {
        self.write_header(&["department_id", "name", "employees"])?;
        for row in report {
            self.writer.serialize(row)?;
        }
        self.flush()
    }

    // Written by hand so an empty listing still gets its header.
    fn write_header(&mut self, header: &[&str]) -> Result<()> {
        self.writer.write_record(header)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
