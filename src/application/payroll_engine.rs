use super::directory::EmployeeDirectory;
use crate::domain::money::Money;
use crate::domain::payroll::{BatchOutcome, Payroll, PayrollSummary};
use crate::domain::ports::PayrollStoreBox;
use crate::error::{Result, StaffrollError};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, warn};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Computes and manages payroll records.
///
/// `PayrollEngine` reads current salary and status through the
/// [`EmployeeDirectory`] and owns the payroll store. Every operation awaits its
/// storage calls in sequence; nothing is cached between calls.
pub struct PayrollEngine {
    directory: Arc<EmployeeDirectory>,
    store: PayrollStoreBox,
}

impl PayrollEngine {
    /// Creates a new `PayrollEngine`.
    ///
    /// # Arguments
    ///
    /// * `directory` - Source of employee salary and status.
    /// * `store` - The store for payroll records.
    pub fn new(directory: Arc<EmployeeDirectory>, store: PayrollStoreBox) -> Self {
        Self { directory, store }
    }

    /// Generates a pending payroll record from the employee's current salary.
    ///
    /// Net pay is `salary + bonus - deductions` and is not floored at zero.
    pub async fn generate_for_employee(
        &self,
        employee_id: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
        bonus: Money,
        deductions: Money,
    ) -> Result<Payroll> {
        let employee = self
            .directory
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| StaffrollError::not_found("Employee", employee_id))?;

        let mut payroll =
            Payroll::for_employee(&employee, period_start, period_end, bonus, deductions);
        payroll.id = self.store.insert(payroll.clone()).await?;

        info!(
            payroll_id = payroll.id,
            employee_id,
            net_salary = %payroll.net_salary,
            "payroll generated"
        );
        Ok(payroll)
    }

    /// Persists a caller-built payroll record. The supplied net salary is
    /// discarded and recomputed.
    pub async fn create(&self, mut payroll: Payroll) -> Result<i64> {
        if payroll.employee_id <= 0 {
            return Err(StaffrollError::validation("Invalid employee ID"));
        }
        if payroll.period_start > payroll.period_end {
            return Err(StaffrollError::validation(
                "Pay period start date must not be after end date",
            ));
        }
        if payroll.basic_salary.is_negative() {
            return Err(StaffrollError::validation("Basic salary cannot be negative"));
        }

        payroll.recompute_net();
        let employee_id = payroll.employee_id;
        let id = self.store.insert(payroll).await?;
        info!(payroll_id = id, employee_id, "payroll created");
        Ok(id)
    }

    /// Writes back a modified record after recomputing its net salary.
    pub async fn update(&self, mut payroll: Payroll) -> Result<bool> {
        if payroll.id <= 0 {
            return Err(StaffrollError::validation("Invalid payroll ID"));
        }

        payroll.recompute_net();
        let id = payroll.id;
        let updated = self.store.update(payroll).await?;
        info!(payroll_id = id, updated, "payroll update");
        Ok(updated)
    }

    pub async fn delete(&self, payroll_id: i64) -> Result<bool> {
        if payroll_id <= 0 {
            return Err(StaffrollError::validation("Invalid payroll ID"));
        }
        let removed = self.store.delete(payroll_id).await?;
        info!(payroll_id, removed, "payroll delete");
        Ok(removed)
    }

    /// Marks the record as paid today.
    ///
    /// This does not look at the current status: a record that is already
    /// `PAID` gets its payment date re-stamped. Callers must check
    /// [`Payroll::is_paid`] first, or use [`PayrollEngine::pay`].
    pub async fn process_payment(&self, payroll_id: i64) -> Result<bool> {
        let date = today();
        let marked = self.store.mark_paid(payroll_id, date).await?;
        info!(payroll_id, %date, marked, "payment processed");
        Ok(marked)
    }

    /// Guarded PENDING -> PAID transition. Returns the updated record.
    pub async fn pay(&self, payroll_id: i64) -> Result<Payroll> {
        if payroll_id <= 0 {
            return Err(StaffrollError::validation("Invalid payroll ID"));
        }
        let current = self
            .store
            .get(payroll_id)
            .await?
            .ok_or_else(|| StaffrollError::not_found("Payroll", payroll_id))?;
        if current.is_paid() {
            return Err(StaffrollError::AlreadyPaid(payroll_id));
        }

        if !self.process_payment(payroll_id).await? {
            return Err(StaffrollError::not_found("Payroll", payroll_id));
        }
        self.store
            .get(payroll_id)
            .await?
            .ok_or_else(|| StaffrollError::not_found("Payroll", payroll_id))
    }

    /// Generates one record per active employee with no bonus or deductions.
    ///
    /// Employees are processed one after another in id order. A failure for one
    /// employee is counted and logged, and the batch moves on; records created
    /// before a failure are kept.
    pub async fn generate_monthly_for_all_active(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<BatchOutcome> {
        let employees = self.directory.list_all().await?;
        let mut outcome = BatchOutcome::default();

        for employee in employees.iter().filter(|e| e.is_active()) {
            match self
                .generate_for_employee(
                    employee.id,
                    period_start,
                    period_end,
                    Money::ZERO,
                    Money::ZERO,
                )
                .await
            {
                Ok(_) => outcome.succeeded += 1,
                Err(e) => {
                    warn!(employee_id = employee.id, error = %e, "payroll generation failed");
                    outcome.failed += 1;
                }
            }
        }

        info!(
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            %period_start,
            %period_end,
            "monthly payroll generation complete"
        );
        Ok(outcome)
    }

    pub async fn find_by_id(&self, payroll_id: i64) -> Result<Option<Payroll>> {
        self.store.get(payroll_id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Payroll>> {
        self.store.list_all().await
    }

    pub async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Payroll>> {
        if start > end {
            return Err(StaffrollError::validation(
                "Range start date must not be after end date",
            ));
        }
        self.store.list_by_date_range(start, end).await
    }

    /// Most recent pay period first. Records of deleted employees are still listed.
    pub async fn history_for_employee(&self, employee_id: i64) -> Result<Vec<Payroll>> {
        debug!(employee_id, "payroll history");
        self.store.list_by_employee(employee_id).await
    }

    pub async fn summary_for_employee(&self, employee_id: i64) -> Result<PayrollSummary> {
        let employee = self
            .directory
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| StaffrollError::not_found("Employee", employee_id))?;
        let history = self.history_for_employee(employee_id).await?;
        Ok(PayrollSummary::from_history(employee, &history))
    }
}
