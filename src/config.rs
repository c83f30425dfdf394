use crate::error::{Result, StaffrollError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "STAFFROLL_DB_PATH";
pub const LOG_ENV: &str = "STAFFROLL_LOG";

/// Settings read from `staffroll.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// RocksDB directory. Unset means in-memory storage.
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as `staffroll=debug`.
    pub filter: Option<String>,
}

impl AppConfig {
    /// Loads the file at `path` if one is given, then applies environment
    /// overrides. A missing path yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_env_vars();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StaffrollError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| StaffrollError::ConfigError(e.to_string()))
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env(|key| std::env::var(key).ok());
    }

    fn merge_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(db_path) = lookup(DB_PATH_ENV).filter(|v| !v.is_empty()) {
            self.storage.db_path = Some(PathBuf::from(db_path));
        }
        if let Some(filter) = lookup(LOG_ENV).filter(|v| !v.is_empty()) {
            self.logging.filter = Some(filter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_parse_full_file() {
        let config = AppConfig::parse(
            r#"
            [storage]
            db_path = "/var/lib/staffroll"

            [logging]
            filter = "staffroll=debug"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.storage.db_path,
            Some(PathBuf::from("/var/lib/staffroll"))
        );
        assert_eq!(config.logging.filter.as_deref(), Some("staffroll=debug"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AppConfig::parse("[logging]\nfilter = \"warn\"\n").unwrap();
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = AppConfig::parse("[storage\ndb_path = 3");
        assert!(matches!(result, Err(StaffrollError::ConfigError(_))));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AppConfig::parse("[storage]\ndb_path = \"from-file\"\n").unwrap();
        let env: HashMap<&str, &str> =
            HashMap::from([(DB_PATH_ENV, "from-env"), (LOG_ENV, "staffroll=trace")]);
        config.merge_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.db_path, Some(PathBuf::from("from-env")));
        assert_eq!(config.logging.filter.as_deref(), Some("staffroll=trace"));
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let mut config = AppConfig::parse("[storage]\ndb_path = \"from-file\"\n").unwrap();
        config.merge_env(|key| (key == DB_PATH_ENV).then(String::new));
        assert_eq!(config.storage.db_path, Some(PathBuf::from("from-file")));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nfilter = \"info\"").unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.filter.as_deref(), Some("info"));

        let missing = AppConfig::from_file(Path::new("/nonexistent/staffroll.toml"));
        assert!(matches!(missing, Err(StaffrollError::ConfigError(_))));
    }
}
