//! Test doubles for exercising the template's resource discipline.

use std::borrow::Borrow;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rusqlite::Connection;

use crate::error::DataAccessError;
use crate::provider::ConnectionProvider;
use crate::results::DbRow;
use crate::types::SqlValue;

/// Wraps another provider and counts acquisitions that have not been given back.
///
/// A connection counts as outstanding from `acquire` until its handle is
/// dropped, which covers both `release` and unwinding.
#[derive(Debug)]
pub struct CountingProvider<P> {
    inner: P,
    outstanding: Arc<AtomicUsize>,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl<P> CountingProvider<P> {
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            outstanding: Arc::new(AtomicUsize::new(0)),
            acquired: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
        }
    }

    /// Connections currently held by callers.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Total successful acquisitions.
    #[must_use]
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Total explicit releases (not counting handles dropped by unwinding).
    #[must_use]
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

/// Connection handle produced by [`CountingProvider`].
#[derive(Debug)]
pub struct CountedConnection<C> {
    conn: Option<C>,
    outstanding: Arc<AtomicUsize>,
}

impl<C: Borrow<Connection>> Borrow<Connection> for CountedConnection<C> {
    fn borrow(&self) -> &Connection {
        match &self.conn {
            Some(conn) => Borrow::<Connection>::borrow(conn),
            None => unreachable!("connection taken before the handle was dropped"),
        }
    }
}

impl<C> Drop for CountedConnection<C> {
    fn drop(&mut self) {
        self.outstanding.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<P: ConnectionProvider> ConnectionProvider for CountingProvider<P> {
    type Connection = CountedConnection<P::Connection>;

    fn acquire(&self) -> Result<Self::Connection, DataAccessError> {
        let conn = self.inner.acquire()?;
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(CountedConnection {
            conn: Some(conn),
            outstanding: Arc::clone(&self.outstanding),
        })
    }

    fn release(&self, mut conn: Self::Connection) -> Result<(), DataAccessError> {
        self.released.fetch_add(1, Ordering::SeqCst);
        match conn.conn.take() {
            Some(inner) => self.inner.release(inner),
            None => Ok(()),
        }
    }
}

/// Create a row with the given column names and values.
#[must_use]
pub fn create_test_row(column_names: Vec<String>, values: Vec<SqlValue>) -> DbRow {
    DbRow::new(Arc::new(column_names), values)
}
