use crate::domain::department::Department;
use crate::domain::employee::Employee;
use crate::domain::payroll::Payroll;
use crate::domain::ports::{DepartmentStore, EmployeeStore, PayrollStore, StoreHealth};
use crate::error::{Result, StaffrollError};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for employee records.
pub const CF_EMPLOYEES: &str = "employees";
/// Column Family for payroll records.
pub const CF_PAYROLLS: &str = "payrolls";
/// Column Family for departments.
pub const CF_DEPARTMENTS: &str = "departments";
/// Column Family holding the last id handed out per entity column family.
pub const CF_SEQUENCES: &str = "sequences";

/// A persistent store implementation using RocksDB.
///
/// Every entity lives in its own Column Family, keyed by its id in big-endian
/// bytes so that iteration yields ascending id order. Values are JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
/// Read-modify-write sequences (id allocation, updates) are serialized by a
/// shared write lock.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

fn key(id: i64) -> [u8; 8] {
    id.to_be_bytes()
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating the
    /// column families on first use.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = [CF_EMPLOYEES, CF_PAYROLLS, CF_DEPARTMENTS, CF_SEQUENCES]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            StaffrollError::PersistenceError(format!("{} column family not found", name))
        })
    }

    fn read<T: DeserializeOwned>(&self, cf_name: &str, id: i64) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, key(id))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&self, cf_name: &str, id: i64, value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value)?;
        self.db.put_cf(cf, key(id), bytes)?;
        Ok(())
    }

    fn exists(&self, cf_name: &str, id: i64) -> Result<bool> {
        let cf = self.cf(cf_name)?;
        Ok(self.db.get_pinned_cf(cf, key(id))?.is_some())
    }

    fn remove(&self, cf_name: &str, id: i64) -> Result<bool> {
        if !self.exists(cf_name, id)? {
            return Ok(false);
        }
        let cf = self.cf(cf_name)?;
        self.db.delete_cf(cf, key(id))?;
        Ok(true)
    }

    /// Full scan in ascending key (id) order.
    fn scan<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut values = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            values.push(serde_json::from_slice(&value)?);
        }
        Ok(values)
    }

    /// Hands out the next id for `cf_name`. Caller must hold `write_lock`.
    fn next_id(&self, cf_name: &str) -> Result<i64> {
        let cf = self.cf(CF_SEQUENCES)?;
        let last = match self.db.get_cf(cf, cf_name.as_bytes())? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    StaffrollError::PersistenceError(format!("corrupt sequence for {}", cf_name))
                })?;
                i64::from_be_bytes(raw)
            }
            None => 0,
        };
        let next = last + 1;
        self.db.put_cf(cf, cf_name.as_bytes(), key(next))?;
        Ok(next)
    }
}

fn newest_period_first(records: &mut [Payroll]) {
    records.sort_by(|a, b| {
        b.period_start
            .cmp(&a.period_start)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl EmployeeStore for RocksDBStore {
    async fn insert(&self, mut employee: Employee) -> Result<i64> {
        let _guard = self.write_lock.lock().await;
        let id = self.next_id(CF_EMPLOYEES)?;
        let now = Utc::now();
        employee.id = id;
        employee.created_at = Some(now);
        employee.updated_at = Some(now);
        self.write(CF_EMPLOYEES, id, &employee)?;
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Employee>> {
        self.read(CF_EMPLOYEES, id)
    }

    async fn list_all(&self) -> Result<Vec<Employee>> {
        self.scan(CF_EMPLOYEES)
    }

    async fn list_by_department(&self, department_id: i64) -> Result<Vec<Employee>> {
        let employees: Vec<Employee> = self.scan(CF_EMPLOYEES)?;
        Ok(employees
            .into_iter()
            .filter(|e| e.department_id == Some(department_id))
            .collect())
    }

    async fn update(&self, mut employee: Employee) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let Some(existing) = self.read::<Employee>(CF_EMPLOYEES, employee.id)? else {
            return Ok(false);
        };
        employee.created_at = existing.created_at;
        employee.updated_at = Some(Utc::now());
        self.write(CF_EMPLOYEES, employee.id, &employee)?;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        self.remove(CF_EMPLOYEES, id)
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>> {
        let employees: Vec<Employee> = self.scan(CF_EMPLOYEES)?;
        Ok(employees
            .into_iter()
            .filter(|e| e.name_matches(fragment))
            .collect())
    }
}

#[async_trait]
impl PayrollStore for RocksDBStore {
    async fn insert(&self, mut payroll: Payroll) -> Result<i64> {
        let _guard = self.write_lock.lock().await;
        let id = self.next_id(CF_PAYROLLS)?;
        payroll.id = id;
        payroll.created_at = Some(Utc::now());
        self.write(CF_PAYROLLS, id, &payroll)?;
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Payroll>> {
        self.read(CF_PAYROLLS, id)
    }

    async fn list_all(&self) -> Result<Vec<Payroll>> {
        let mut records: Vec<Payroll> = self.scan(CF_PAYROLLS)?;
        records.reverse();
        Ok(records)
    }

    async fn list_by_employee(&self, employee_id: i64) -> Result<Vec<Payroll>> {
        let records: Vec<Payroll> = self.scan(CF_PAYROLLS)?;
        let mut records: Vec<Payroll> = records
            .into_iter()
            .filter(|p| p.employee_id == employee_id)
            .collect();
        newest_period_first(&mut records);
        Ok(records)
    }

    async fn list_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Payroll>> {
        let records: Vec<Payroll> = self.scan(CF_PAYROLLS)?;
        let mut records: Vec<Payroll> = records
            .into_iter()
            .filter(|p| p.period_start >= start && p.period_end <= end)
            .collect();
        newest_period_first(&mut records);
        Ok(records)
    }

    async fn update(&self, mut payroll: Payroll) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let Some(existing) = self.read::<Payroll>(CF_PAYROLLS, payroll.id)? else {
            return Ok(false);
        };
        payroll.created_at = existing.created_at;
        self.write(CF_PAYROLLS, payroll.id, &payroll)?;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        self.remove(CF_PAYROLLS, id)
    }

    async fn mark_paid(&self, id: i64, date: NaiveDate) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let Some(mut payroll) = self.read::<Payroll>(CF_PAYROLLS, id)? else {
            return Ok(false);
        };
        payroll.mark_paid(date);
        self.write(CF_PAYROLLS, id, &payroll)?;
        Ok(true)
    }
}

#[async_trait]
impl DepartmentStore for RocksDBStore {
    async fn insert(&self, mut department: Department) -> Result<i64> {
        let _guard = self.write_lock.lock().await;
        let id = self.next_id(CF_DEPARTMENTS)?;
        department.id = id;
        department.created_at = Some(Utc::now());
        self.write(CF_DEPARTMENTS, id, &department)?;
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Department>> {
        self.read(CF_DEPARTMENTS, id)
    }

    async fn list_all(&self) -> Result<Vec<Department>> {
        self.scan(CF_DEPARTMENTS)
    }

    async fn update(&self, mut department: Department) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let Some(existing) = self.read::<Department>(CF_DEPARTMENTS, department.id)? else {
            return Ok(false);
        };
        department.created_at = existing.created_at;
        self.write(CF_DEPARTMENTS, department.id, &department)?;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        self.remove(CF_DEPARTMENTS, id)
    }
}

#[async_trait]
impl StoreHealth for RocksDBStore {
    async fn test_connection(&self) -> bool {
        [CF_EMPLOYEES, CF_PAYROLLS, CF_DEPARTMENTS, CF_SEQUENCES]
            .iter()
            .all(|name| self.db.cf_handle(name).is_some())
    }
}
