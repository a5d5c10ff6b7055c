//! Statement execution with scoped resource release.
//!
//! Both primitives follow the same shape: acquire a connection, prepare one
//! statement, bind the parameters positionally, run, then give everything
//! back in reverse order (cursor, statement, connection). Release happens on
//! every exit path. When the operation itself already failed, a release
//! failure is logged and the original failure is returned; when the
//! operation succeeded, a release failure is returned instead of the value.

use std::borrow::Borrow;

use rusqlite::{Connection, Statement, params_from_iter};

use crate::error::DataAccessError;
use crate::provider::ConnectionProvider;
use crate::results::Cursor;
use crate::types::SqlValue;

/// Run an INSERT/UPDATE/DELETE (or DDL) and return the number of affected rows.
///
/// # Errors
/// Returns `DataAccessError` if the connection cannot be acquired, the
/// statement cannot be prepared, the parameters do not match the
/// placeholders, or execution fails.
pub fn execute_update<P>(
    provider: &P,
    sql: &str,
    params: &[SqlValue],
) -> Result<usize, DataAccessError>
where
    P: ConnectionProvider + ?Sized,
{
    tracing::debug!(sql, params = params.len(), "execute update");
    let conn = provider.acquire()?;
    let outcome = update_on(Borrow::<Connection>::borrow(&conn), sql, params);
    settle(outcome, provider.release(conn))
}

/// Run a query and hand its cursor to `consumer`, returning what it produces.
///
/// The cursor is closed before this function returns, whether or not the
/// consumer succeeded.
///
/// # Errors
/// Returns `DataAccessError` for the same reasons as [`execute_update`], plus
/// anything the consumer returns.
pub fn execute_query<P, T, F>(
    provider: &P,
    sql: &str,
    params: &[SqlValue],
    consumer: F,
) -> Result<T, DataAccessError>
where
    P: ConnectionProvider + ?Sized,
    F: FnOnce(&mut Cursor<'_>) -> Result<T, DataAccessError>,
{
    tracing::debug!(sql, params = params.len(), "execute query");
    let conn = provider.acquire()?;
    let outcome = query_on(Borrow::<Connection>::borrow(&conn), sql, params, consumer);
    settle(outcome, provider.release(conn))
}

fn update_on(conn: &Connection, sql: &str, params: &[SqlValue]) -> Result<usize, DataAccessError> {
    let mut stmt = prepare(conn, sql, params)?;
    let outcome = stmt
        .execute(params_from_iter(params))
        .map_err(DataAccessError::from);
    settle(outcome, stmt.finalize().map_err(DataAccessError::from))
}

fn query_on<T, F>(
    conn: &Connection,
    sql: &str,
    params: &[SqlValue],
    consumer: F,
) -> Result<T, DataAccessError>
where
    F: FnOnce(&mut Cursor<'_>) -> Result<T, DataAccessError>,
{
    let mut stmt = prepare(conn, sql, params)?;
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let outcome = match stmt.query(params_from_iter(params)) {
        Ok(rows) => {
            let mut cursor = Cursor::new(rows, column_names);
            consumer(&mut cursor)
        }
        Err(e) => Err(DataAccessError::from(e)),
    };
    settle(outcome, stmt.finalize().map_err(DataAccessError::from))
}

fn prepare<'conn>(
    conn: &'conn Connection,
    sql: &str,
    params: &[SqlValue],
) -> Result<Statement<'conn>, DataAccessError> {
    let stmt = conn.prepare(sql)?;
    let expected = stmt.parameter_count();
    if params.len() > expected {
        return Err(DataAccessError::ParameterCount {
            expected,
            given: params.len(),
        });
    }
    Ok(stmt)
}

/// Combine an operation's outcome with the result of releasing its resource.
/// The first failure wins.
pub(crate) fn settle<T>(
    outcome: Result<T, DataAccessError>,
    released: Result<(), DataAccessError>,
) -> Result<T, DataAccessError> {
    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(release_err)) => Err(release_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(release_err)) => {
            tracing::warn!(error = %release_err, original = %err, "release failed after an earlier failure");
            Err(err)
        }
    }
}
