use super::employee::Employee;
use super::money::Money;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment lifecycle of a payroll record. `Paid` is terminal.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("PENDING"),
            Self::Paid => f.write_str("PAID"),
        }
    }
}

/// A payroll record for one employee over one pay period.
///
/// `net_salary` is derived from `basic_salary + bonus - deductions`. Any code
/// that changes one of those inputs must call [`Payroll::recompute_net`] before
/// the record is persisted.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payroll {
    pub id: i64,
    pub employee_id: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Snapshot of the employee's salary when the record was generated.
    pub basic_salary: Money,
    pub bonus: Money,
    pub deductions: Money,
    pub net_salary: Money,
    pub payment_date: Option<NaiveDate>,
    pub payment_status: PaymentStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Payroll {
    pub fn new(
        employee_id: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
        basic_salary: Money,
        bonus: Money,
        deductions: Money,
    ) -> Self {
        Self {
            id: 0,
            employee_id,
            period_start,
            period_end,
            basic_salary,
            bonus,
            deductions,
            net_salary: basic_salary + bonus - deductions,
            payment_date: None,
            payment_status: PaymentStatus::Pending,
            created_at: None,
        }
    }

    /// Builds a pending record from the employee's current salary.
    pub fn for_employee(
        employee: &Employee,
        period_start: NaiveDate,
        period_end: NaiveDate,
        bonus: Money,
        deductions: Money,
    ) -> Self {
        Self::new(
            employee.id,
            period_start,
            period_end,
            employee.salary,
            bonus,
            deductions,
        )
    }

    pub fn recompute_net(&mut self) {
        self.net_salary = self.basic_salary + self.bonus - self.deductions;
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// Stamps the record as paid on `date`, overwriting any earlier payment date.
    pub fn mark_paid(&mut self, date: NaiveDate) {
        self.payment_status = PaymentStatus::Paid;
        self.payment_date = Some(date);
    }
}

/// Aggregate view of an employee's payroll history.
#[derive(Debug, PartialEq, Clone)]
pub struct PayrollSummary {
    pub employee: Employee,
    pub record_count: usize,
    pub total_paid: Money,
    pub total_pending: Money,
}

impl PayrollSummary {
    pub fn from_history(employee: Employee, history: &[Payroll]) -> Self {
        let (paid, pending): (Vec<&Payroll>, Vec<&Payroll>) =
            history.iter().partition(|p| p.is_paid());
        Self {
            employee,
            record_count: history.len(),
            total_paid: paid.iter().map(|p| p.net_salary).sum(),
            total_pending: pending.iter().map(|p| p.net_salary).sum(),
        }
    }
}

/// Counts reported by a batch generation run.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pending(net: Money) -> Payroll {
        Payroll::new(1, date(2024, 1, 1), date(2024, 1, 31), net, Money::ZERO, Money::ZERO)
    }

    #[test]
    fn test_new_payroll_computes_net_and_is_pending() {
        let payroll = Payroll::new(
            7,
            date(2024, 1, 1),
            date(2024, 1, 31),
            Money::new(dec!(5000)),
            Money::new(dec!(500)),
            Money::new(dec!(200)),
        );
        assert_eq!(payroll.net_salary, Money::new(dec!(5300)));
        assert_eq!(payroll.payment_status, PaymentStatus::Pending);
        assert!(payroll.payment_date.is_none());
    }

    #[test]
    fn test_net_salary_may_go_negative() {
        let payroll = Payroll::new(
            7,
            date(2024, 1, 1),
            date(2024, 1, 31),
            Money::new(dec!(100)),
            Money::ZERO,
            Money::new(dec!(250)),
        );
        assert_eq!(payroll.net_salary, Money::new(dec!(-150)));
    }

    #[test]
    fn test_recompute_net_after_adjustment() {
        let mut payroll = pending(Money::new(dec!(3000)));
        payroll.bonus = Money::new(dec!(150.25));
        payroll.deductions = Money::new(dec!(50));
        payroll.recompute_net();
        assert_eq!(payroll.net_salary, Money::new(dec!(3100.25)));
    }

    #[test]
    fn test_mark_paid_overwrites_date() {
        let mut payroll = pending(Money::new(dec!(1000)));
        payroll.mark_paid(date(2024, 2, 1));
        payroll.mark_paid(date(2024, 3, 1));
        assert!(payroll.is_paid());
        assert_eq!(payroll.payment_date, Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_summary_partitions_paid_and_pending() {
        let employee = Employee::new(
            "Anna",
            "Smith",
            "anna@example.com",
            date(2020, 1, 1),
            Money::new(dec!(1000)),
        );
        let mut paid = pending(Money::new(dec!(1000)));
        paid.mark_paid(date(2024, 2, 1));
        let history = vec![paid, pending(Money::new(dec!(1200)))];

        let summary = PayrollSummary::from_history(employee, &history);
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.total_paid, Money::new(dec!(1000)));
        assert_eq!(summary.total_pending, Money::new(dec!(1200)));
    }

    #[test]
    fn test_summary_of_empty_history() {
        let employee = Employee::new(
            "Anna",
            "Smith",
            "anna@example.com",
            date(2020, 1, 1),
            Money::new(dec!(1000)),
        );
        let summary = PayrollSummary::from_history(employee, &[]);
        assert_eq!(summary.record_count, 0);
        assert_eq!(summary.total_paid, Money::ZERO);
        assert_eq!(summary.total_pending, Money::ZERO);
    }
}
