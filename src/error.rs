use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaffrollError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Payroll {0} has already been paid")]
    AlreadyPaid(i64),
    #[error("Persistence error: {0}")]
    PersistenceError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl StaffrollError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<serde_json::Error> for StaffrollError {
    fn from(e: serde_json::Error) -> Self {
        Self::PersistenceError(format!("Serialization error: {}", e))
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for StaffrollError {
    fn from(e: rocksdb::Error) -> Self {
        Self::PersistenceError(format!("RocksDB error: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, StaffrollError>;
