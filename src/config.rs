use std::time::Duration;

use serde::Serialize;

use crate::error::DataAccessError;
use crate::provider::SqliteProvider;

/// Options for opening `SQLite` connections.
#[derive(Debug, Clone, Serialize)]
pub struct SqliteOptions {
    pub db_path: String,
    pub read_only: bool,
    pub busy_timeout: Option<Duration>,
    pub wal: bool,
    pub foreign_keys: bool,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            read_only: false,
            busy_timeout: Some(Duration::from_secs(5)),
            wal: false,
            foreign_keys: true,
        }
    }

    /// Reject option combinations the provider cannot honour.
    ///
    /// # Errors
    /// Returns `DataAccessError::ConfigError` for an empty path, or for WAL
    /// requested on a read-only connection.
    pub fn validate(&self) -> Result<(), DataAccessError> {
        if self.db_path.trim().is_empty() {
            return Err(DataAccessError::ConfigError(
                "database path must not be empty".into(),
            ));
        }
        if self.read_only && self.wal {
            return Err(DataAccessError::ConfigError(
                "WAL journal mode cannot be set on a read-only connection".into(),
            ));
        }
        Ok(())
    }

    /// Options as a JSON object, for log fields.
    pub(crate) fn to_log_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Statements run on every freshly opened connection.
    pub(crate) fn pragmas(&self) -> String {
        let mut pragmas = String::new();
        if self.foreign_keys {
            pragmas.push_str("PRAGMA foreign_keys = ON;");
        }
        if self.wal {
            pragmas.push_str("PRAGMA journal_mode = WAL;");
        }
        pragmas
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.opts.read_only = read_only;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.opts.busy_timeout = timeout;
        self
    }

    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.opts.wal = wal;
        self
    }

    #[must_use]
    pub fn foreign_keys(mut self, foreign_keys: bool) -> Self {
        self.opts.foreign_keys = foreign_keys;
        self
    }

    /// Validate and return the options.
    ///
    /// # Errors
    /// Returns `DataAccessError::ConfigError` if validation fails.
    pub fn finish(self) -> Result<SqliteOptions, DataAccessError> {
        self.opts.validate()?;
        Ok(self.opts)
    }

    /// Build a provider from the options.
    ///
    /// # Errors
    /// Returns `DataAccessError::ConfigError` if validation fails.
    pub fn build(self) -> Result<SqliteProvider, DataAccessError> {
        SqliteProvider::new(self.finish()?)
    }
}
