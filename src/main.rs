use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use staffroll::application::departments::DepartmentRegistry;
use staffroll::application::directory::EmployeeDirectory;
use staffroll::application::payroll_engine::PayrollEngine;
use staffroll::config::AppConfig;
use staffroll::domain::department::Department;
use staffroll::domain::employee::{Employee, EmployeeStatus};
use staffroll::domain::money::Money;
use staffroll::domain::ports::{
    DepartmentStoreBox, EmployeeStoreBox, PayrollStoreBox, StoreHealthBox,
};
use staffroll::error::StaffrollError;
use staffroll::infrastructure::in_memory::{
    InMemoryDepartmentStore, InMemoryEmployeeStore, InMemoryPayrollStore,
};
use staffroll::interfaces::csv::employee_reader::EmployeeReader;
use staffroll::interfaces::csv::record_writer::RecordWriter;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "staffroll", author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Employees CSV loaded into the directory before the command runs
    #[arg(long, global = true)]
    import: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Employee directory
    #[command(subcommand)]
    Employee(EmployeeCommand),
    /// Payroll records
    #[command(subcommand)]
    Payroll(PayrollCommand),
    /// Departments
    #[command(subcommand)]
    Department(DepartmentCommand),
}

#[derive(Subcommand)]
enum EmployeeCommand {
    Add(NewEmployee),
    List {
        #[arg(long)]
        department: Option<i64>,
    },
    Show {
        id: i64,
    },
    /// Case-insensitive match on first or last name
    Search {
        text: String,
    },
    Update(EmployeeUpdate),
    Delete {
        id: i64,
    },
}

#[derive(Args)]
struct NewEmployee {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    hire_date: NaiveDate,
    #[arg(long, allow_negative_numbers = true)]
    salary: Money,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    job_title: String,
    #[arg(long)]
    department: Option<i64>,
    #[arg(long, default_value_t = EmployeeStatus::Active)]
    status: EmployeeStatus,
}

#[derive(Args)]
struct EmployeeUpdate {
    id: i64,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    job_title: Option<String>,
    #[arg(long)]
    department: Option<i64>,
    #[arg(long)]
    salary: Option<Money>,
    #[arg(long)]
    status: Option<EmployeeStatus>,
}

#[derive(Subcommand)]
enum PayrollCommand {
    Generate {
        #[arg(long)]
        employee: i64,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long, default_value_t = Money::ZERO)]
        bonus: Money,
        #[arg(long, default_value_t = Money::ZERO)]
        deductions: Money,
    },
    /// One record per active employee
    GenerateMonthly {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    List {
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
    History {
        employee_id: i64,
    },
    Summary {
        employee_id: i64,
    },
    /// Change bonus or deductions; net salary is recomputed
    Adjust {
        id: i64,
        #[arg(long)]
        bonus: Option<Money>,
        #[arg(long)]
        deductions: Option<Money>,
    },
    Pay {
        id: i64,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
enum DepartmentCommand {
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    List,
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: i64,
    },
    Headcount,
}

struct Stores {
    employees: EmployeeStoreBox,
    payrolls: PayrollStoreBox,
    departments: DepartmentStoreBox,
    health: StoreHealthBox,
}

impl Stores {
    fn in_memory() -> Self {
        let employees = InMemoryEmployeeStore::new();
        Self {
            employees: Box::new(employees.clone()),
            payrolls: Box::new(InMemoryPayrollStore::new()),
            departments: Box::new(InMemoryDepartmentStore::new()),
            health: Box::new(employees),
        }
    }

    #[cfg(feature = "storage-rocksdb")]
    fn open(db_path: Option<&Path>) -> Result<Self> {
        use staffroll::infrastructure::rocksdb::RocksDBStore;

        let Some(path) = db_path else {
            return Ok(Self::in_memory());
        };
        let store = RocksDBStore::open(path).into_diagnostic()?;
        info!(path = %path.display(), "using RocksDB storage");
        Ok(Self {
            employees: Box::new(store.clone()),
            payrolls: Box::new(store.clone()),
            departments: Box::new(store.clone()),
            health: Box::new(store),
        })
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    fn open(db_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = db_path {
            tracing::warn!(
                path = %path.display(),
                "storage-rocksdb feature not enabled. Falling back to in-memory storage"
            );
        }
        Ok(Self::in_memory())
    }
}

struct Services {
    directory: Arc<EmployeeDirectory>,
    payroll: PayrollEngine,
    departments: DepartmentRegistry,
}

impl Services {
    fn new(stores: Stores) -> Self {
        let directory = Arc::new(EmployeeDirectory::new(stores.employees));
        Self {
            payroll: PayrollEngine::new(directory.clone(), stores.payrolls),
            departments: DepartmentRegistry::new(stores.departments, directory.clone()),
            directory,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).into_diagnostic()?;
    if let Some(db_path) = cli.db_path {
        config.storage.db_path = Some(db_path);
    }
    staffroll::telemetry::init(config.logging.filter.as_deref());

    let stores = Stores::open(config.storage.db_path.as_deref())?;
    if !stores.health.test_connection().await {
        miette::bail!("Storage connection check failed");
    }
    let services = Services::new(stores);

    if let Some(path) = &cli.import {
        import_employees(&services.directory, path).await?;
    }

    match cli.command {
        Some(Command::Employee(cmd)) => run_employee(&services, cmd).await,
        Some(Command::Payroll(cmd)) => run_payroll(&services, cmd).await,
        Some(Command::Department(cmd)) => run_department(&services, cmd).await,
        None => Ok(()),
    }
}

async fn import_employees(directory: &EmployeeDirectory, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    let reader = EmployeeReader::new(file);
    let (mut imported, mut rejected) = (0usize, 0usize);
    for row in reader.employees() {
        match row {
            Ok(employee) => match directory.create(employee).await {
                Ok(_) => imported += 1,
                Err(e) => {
                    eprintln!("Error importing employee: {}", e);
                    rejected += 1;
                }
            },
            Err(e) => {
                eprintln!("Error reading employee: {}", e);
                rejected += 1;
            }
        }
    }
    info!(imported, rejected, path = %path.display(), "employee import complete");
    Ok(())
}

fn stdout_writer() -> RecordWriter<io::StdoutLock<'static>> {
    RecordWriter::new(io::stdout().lock())
}

async fn run_employee(services: &Services, cmd: EmployeeCommand) -> Result<()> {
    let directory = &services.directory;
    match cmd {
        EmployeeCommand::Add(new) => {
            let mut employee = Employee::new(
                new.first_name,
                new.last_name,
                new.email,
                new.hire_date,
                new.salary,
            )
            .with_phone(new.phone)
            .with_job_title(new.job_title)
            .with_status(new.status);
            employee.department_id = new.department;
            let id = directory.create(employee).await.into_diagnostic()?;
            println!("employee_id={}", id);
        }
        EmployeeCommand::List { department } => {
            let employees = match department {
                Some(id) => directory.list_by_department(id).await,
                None => directory.list_all().await,
            }
            .into_diagnostic()?;
            stdout_writer().write_employees(&employees).into_diagnostic()?;
        }
        EmployeeCommand::Show { id } => {
            let employee = directory
                .find_by_id(id)
                .await
                .into_diagnostic()?
                .ok_or_else(|| StaffrollError::not_found("Employee", id))
                .into_diagnostic()?;
            stdout_writer().write_employees([&employee]).into_diagnostic()?;
        }
        EmployeeCommand::Search { text } => {
            let matches = directory.search_by_name(&text).await.into_diagnostic()?;
            stdout_writer().write_employees(&matches).into_diagnostic()?;
        }
        EmployeeCommand::Update(changes) => {
            let mut employee = directory
                .find_by_id(changes.id)
                .await
                .into_diagnostic()?
                .ok_or_else(|| StaffrollError::not_found("Employee", changes.id))
                .into_diagnostic()?;
            if let Some(v) = changes.first_name {
                employee.first_name = v;
            }
            if let Some(v) = changes.last_name {
                employee.last_name = v;
            }
            if let Some(v) = changes.email {
                employee.email = v;
            }
            if let Some(v) = changes.phone {
                employee.phone = v;
            }
            if let Some(v) = changes.job_title {
                employee.job_title = v;
            }
            if let Some(v) = changes.department {
                employee.department_id = Some(v);
            }
            if let Some(v) = changes.salary {
                employee.salary = v;
            }
            if let Some(v) = changes.status {
                employee.status = v;
            }
            let updated = directory.update(employee).await.into_diagnostic()?;
            println!("updated={}", updated);
        }
        EmployeeCommand::Delete { id } => {
            let deleted = directory.delete(id).await.into_diagnostic()?;
            println!("deleted={}", deleted);
        }
    }
    Ok(())
}

async fn run_payroll(services: &Services, cmd: PayrollCommand) -> Result<()> {
    let engine = &services.payroll;
    match cmd {
        PayrollCommand::Generate {
            employee,
            start,
            end,
            bonus,
            deductions,
        } => {
            let payroll = engine
                .generate_for_employee(employee, start, end, bonus, deductions)
                .await
                .into_diagnostic()?;
            println!(
                "payroll_id={} net_salary={} status={}",
                payroll.id, payroll.net_salary, payroll.payment_status
            );
        }
        PayrollCommand::GenerateMonthly { start, end } => {
            let outcome = engine
                .generate_monthly_for_all_active(start, end)
                .await
                .into_diagnostic()?;
            println!("succeeded={} failed={}", outcome.succeeded, outcome.failed);
        }
        PayrollCommand::List { from, to } => {
            let payrolls = match (from, to) {
                (Some(from), Some(to)) => engine.list_by_date_range(from, to).await,
                _ => engine.list_all().await,
            }
            .into_diagnostic()?;
            stdout_writer().write_payrolls(&payrolls).into_diagnostic()?;
        }
        PayrollCommand::History { employee_id } => {
            let history = engine
                .history_for_employee(employee_id)
                .await
                .into_diagnostic()?;
            stdout_writer().write_payrolls(&history).into_diagnostic()?;
        }
        PayrollCommand::Summary { employee_id } => {
            let summary = engine
                .summary_for_employee(employee_id)
                .await
                .into_diagnostic()?;
            println!("employee_id={}", summary.employee.id);
            println!("name={}", summary.employee.full_name());
            println!("records={}", summary.record_count);
            println!("total_paid={}", summary.total_paid);
            println!("total_pending={}", summary.total_pending);
        }
        PayrollCommand::Adjust {
            id,
            bonus,
            deductions,
        } => {
            let mut payroll = engine
                .find_by_id(id)
                .await
                .into_diagnostic()?
                .ok_or_else(|| StaffrollError::not_found("Payroll", id))
                .into_diagnostic()?;
            if let Some(v) = bonus {
                payroll.bonus = v;
            }
            if let Some(v) = deductions {
                payroll.deductions = v;
            }
            let updated = engine.update(payroll).await.into_diagnostic()?;
            let net_salary = engine
                .find_by_id(id)
                .await
                .into_diagnostic()?
                .map(|p| p.net_salary.to_string())
                .unwrap_or_default();
            println!("updated={} net_salary={}", updated, net_salary);
        }
        PayrollCommand::Pay { id } => {
            let payroll = engine.pay(id).await.into_diagnostic()?;
            let paid_on = payroll
                .payment_date
                .map(|d| d.to_string())
                .unwrap_or_default();
            println!("paid={} payment_date={}", payroll.id, paid_on);
        }
        PayrollCommand::Delete { id } => {
            let deleted = engine.delete(id).await.into_diagnostic()?;
            println!("deleted={}", deleted);
        }
    }
    Ok(())
}

async fn run_department(services: &Services, cmd: DepartmentCommand) -> Result<()> {
    let registry = &services.departments;
    match cmd {
        DepartmentCommand::Add { name, description } => {
            let id = registry
                .create(Department::new(name, description))
                .await
                .into_diagnostic()?;
            println!("department_id={}", id);
        }
        DepartmentCommand::List => {
            let departments = registry.list_all().await.into_diagnostic()?;
            stdout_writer()
                .write_departments(&departments)
                .into_diagnostic()?;
        }
        DepartmentCommand::Update {
            id,
            name,
            description,
        } => {
            let mut department = registry
                .find_by_id(id)
                .await
                .into_diagnostic()?
                .ok_or_else(|| StaffrollError::not_found("Department", id))
                .into_diagnostic()?;
            if let Some(v) = name {
                department.name = v;
            }
            if let Some(v) = description {
                department.description = v;
            }
            let updated = registry.update(department).await.into_diagnostic()?;
            println!("updated={}", updated);
        }
        DepartmentCommand::Delete { id } => {
            let deleted = registry.delete(id).await.into_diagnostic()?;
            println!("deleted={}", deleted);
        }
        DepartmentCommand::Headcount => {
            let report = registry.headcount().await.into_diagnostic()?;
            stdout_writer().write_headcount(&report).into_diagnostic()?;
        }
    }
    Ok(())
}
