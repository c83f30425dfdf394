use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const HEADER: &str =
    "first_name, last_name, email, phone, hire_date, job_title, department_id, salary, status";

#[test]
fn test_generate_with_bonus_and_deductions() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    writeln!(file, "Anna, Smith, anna@example.com, , 2021-04-01, , , 5000, ACTIVE").unwrap();

    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.arg("--import")
        .arg(file.path())
        .args(["payroll", "generate", "--employee", "1"])
        .args(["--start", "2024-01-01", "--end", "2024-01-31"])
        .args(["--bonus", "500", "--deductions", "200"]);

    // 5000 + 500 - 200 = 5300, pending until paid
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("payroll_id=1 net_salary=5300 status=PENDING"));
}

#[test]
fn test_monthly_generation_skips_inactive() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    writeln!(file, "Anna, Smith, anna@example.com, , 2021-04-01, , , 3000, ACTIVE").unwrap();
    writeln!(file, "Dan, Anderson, dan@example.com, , 2021-04-01, , , 4000, ACTIVE").unwrap();
    writeln!(file, "Carol, White, carol@example.com, , 2021-04-01, , , 5000, INACTIVE").unwrap();
    writeln!(file, "Omar, Reyes, omar@example.com, , 2021-04-01, , , 5000, ON_LEAVE").unwrap();

    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.arg("--import")
        .arg(file.path())
        .args(["payroll", "generate-monthly"])
        .args(["--start", "2024-02-01", "--end", "2024-02-29"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("succeeded=2 failed=0"));
}

#[test]
fn test_payroll_for_unknown_ids() {
    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.args(["payroll", "pay", "42"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Payroll with id 42 not found"));

    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.args(["payroll", "adjust", "42", "--bonus", "10"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Payroll with id 42 not found"));

    // Deleting a missing record is not an error
    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.args(["payroll", "delete", "42"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("deleted=false"));
}

#[test]
fn test_invalid_ids_are_validation_errors() {
    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.args(["payroll", "pay", "0"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid payroll ID"));

    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.args(["employee", "delete", "--", "-3"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid employee ID"));
}
