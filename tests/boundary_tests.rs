use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

fn write_rows(path: &std::path::Path, rows: &[[&str; 9]]) {
    let mut wtr = csv::Writer::from_path(path).unwrap();
    wtr.write_record(common::HEADER).unwrap();
    for row in rows {
        wtr.write_record(row).unwrap();
    }
    wtr.flush().unwrap();
}

#[test]
fn test_boundary_numerical_values() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("boundary.csv");
    write_rows(
        &output_path,
        &[[
            "Max", "Value", "max@example.com", "", "2020-01-01", "", "9223372036854775807",
            "1000000000.0000", "ACTIVE",
        ]],
    );

    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.arg("--import")
        .arg(&output_path)
        .args(["employee", "list"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "1,Max,Value,max@example.com,,2020-01-01,,9223372036854775807,1000000000,ACTIVE",
        ));
}

#[test]
fn test_extreme_decimal_precision() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("precision.csv");
    write_rows(
        &output_path,
        &[[
            "Tiny", "Salary", "tiny@example.com", "", "2020-01-01", "", "", "0.0001", "ACTIVE",
        ]],
    );

    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.arg("--import")
        .arg(&output_path)
        .args(["payroll", "generate", "--employee", "1"])
        .args(["--start", "2024-01-01", "--end", "2024-01-31"])
        .args(["--bonus", "0.0001", "--deductions", "0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("net_salary=0.0002"));
}

#[test]
fn test_deductions_can_exceed_salary() {
    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.args(["--import", "tests/fixtures/employees.csv"])
        .args(["payroll", "generate", "--employee", "2"])
        .args(["--start", "2024-01-01", "--end", "2024-01-31"])
        .args(["--deductions", "5000"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("net_salary=-999.5"));
}

#[test]
fn test_single_day_period() {
    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.args(["--import", "tests/fixtures/employees.csv"])
        .args(["payroll", "list", "--from", "2024-03-01", "--to", "2024-03-01"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::diff(
            "id,employee_id,period_start,period_end,basic_salary,bonus,deductions,net_salary,payment_date,payment_status\n",
        ));
}
