use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 9] = [
    "first_name",
    "last_name",
    "email",
    "phone",
    "hire_date",
    "job_title",
    "department_id",
    "salary",
    "status",
];

const STATUSES: [&str; 4] = ["ACTIVE", "INACTIVE", "ON_LEAVE", "TERMINATED"];

/// Writes `rows` active employees spread over five departments.
pub fn generate_employees_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        write_employee(&mut wtr, i, "ACTIVE")?;
    }

    wtr.flush()?;
    Ok(())
}

/// Like [`generate_employees_csv`] but cycles through every status, so one
/// row in four is active.
pub fn generate_mixed_status_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        write_employee(&mut wtr, i, STATUSES[(i - 1) % STATUSES.len()])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_employee(wtr: &mut csv::Writer<File>, i: usize, status: &str) -> Result<(), Error> {
    wtr.write_record([
        format!("First{}", i).as_str(),
        format!("Last{}", i).as_str(),
        format!("employee{}@example.com", i).as_str(),
        "",
        "2020-01-01",
        "Clerk",
        ((i % 5) + 1).to_string().as_str(),
        format!("{}.50", 2000 + i).as_str(),
        status,
    ])?;
    Ok(())
}
