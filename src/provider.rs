//! Where connections come from.
//!
//! The template never pools or caches connections: each call asks a
//! [`ConnectionProvider`] for one and hands it back through
//! [`ConnectionProvider::release`] before returning.

use std::borrow::Borrow;
use std::sync::Arc;

use rusqlite::{Connection, OpenFlags};

use crate::config::{SqliteOptions, SqliteOptionsBuilder};
use crate::error::DataAccessError;

/// Source of live database connections.
///
/// Implementations must hand out connections that are safe to use
/// independently of each other; concurrent template calls never share one.
pub trait ConnectionProvider {
    type Connection: Borrow<Connection>;

    /// Obtain a connection for the duration of one call.
    ///
    /// # Errors
    /// Returns `DataAccessError::ConnectionFailure` if no usable connection
    /// can be produced.
    fn acquire(&self) -> Result<Self::Connection, DataAccessError>;

    /// Take a connection back. The default simply drops it.
    ///
    /// # Errors
    /// Returns `DataAccessError::ConnectionFailure` if the connection could not
    /// be closed cleanly.
    fn release(&self, conn: Self::Connection) -> Result<(), DataAccessError> {
        drop(conn);
        Ok(())
    }
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    type Connection = P::Connection;

    fn acquire(&self) -> Result<Self::Connection, DataAccessError> {
        (**self).acquire()
    }

    fn release(&self, conn: Self::Connection) -> Result<(), DataAccessError> {
        (**self).release(conn)
    }
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for Arc<P> {
    type Connection = P::Connection;

    fn acquire(&self) -> Result<Self::Connection, DataAccessError> {
        (**self).acquire()
    }

    fn release(&self, conn: Self::Connection) -> Result<(), DataAccessError> {
        (**self).release(conn)
    }
}

/// Opens a new `SQLite` connection per acquisition and closes it on release.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    opts: SqliteOptions,
}

impl SqliteProvider {
    /// # Errors
    /// Returns `DataAccessError::ConfigError` if the options are invalid.
    pub fn new(opts: SqliteOptions) -> Result<Self, DataAccessError> {
        opts.validate()?;
        tracing::debug!(options = %opts.to_log_json(), "configured SQLite provider");
        Ok(Self { opts })
    }

    #[must_use]
    pub fn builder(db_path: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }

    #[must_use]
    pub fn options(&self) -> &SqliteOptions {
        &self.opts
    }

    fn open_flags(&self) -> OpenFlags {
        let base = if self.opts.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
        };
        base | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX
    }
}

impl ConnectionProvider for SqliteProvider {
    type Connection = Connection;

    fn acquire(&self) -> Result<Connection, DataAccessError> {
        let path = &self.opts.db_path;
        let conn = Connection::open_with_flags(path, self.open_flags()).map_err(|e| {
            DataAccessError::connection(format!("failed to open SQLite database `{path}`"), e)
        })?;
        if let Some(timeout) = self.opts.busy_timeout {
            conn.busy_timeout(timeout).map_err(|e| {
                DataAccessError::connection("failed to set SQLite busy timeout", e)
            })?;
        }
        let pragmas = self.opts.pragmas();
        if !pragmas.is_empty() {
            conn.execute_batch(&pragmas).map_err(|e| {
                DataAccessError::connection("failed to apply SQLite pragmas", e)
            })?;
        }
        tracing::debug!(db_path = %path, "opened SQLite connection");
        Ok(conn)
    }

    fn release(&self, conn: Connection) -> Result<(), DataAccessError> {
        conn.close()
            .map_err(|(_, e)| DataAccessError::connection("failed to close SQLite connection", e))
    }
}
