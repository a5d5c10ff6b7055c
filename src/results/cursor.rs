use std::sync::Arc;

use rusqlite::{Row, Rows};

use super::row::{ColumnIndex, DbRow, build_column_index};
use crate::error::{DataAccessError, MappingError};
use crate::types::SqlValue;

/// Forward-only, single-pass view over the rows of one query.
///
/// The cursor borrows the prepared statement, so it cannot outlive the query
/// call that opened it. Each row is copied out into an owned [`DbRow`].
pub struct Cursor<'stmt> {
    rows: Rows<'stmt>,
    column_names: Arc<Vec<String>>,
    column_index: ColumnIndex,
    rows_read: usize,
}

impl<'stmt> Cursor<'stmt> {
    pub(crate) fn new(rows: Rows<'stmt>, column_names: Vec<String>) -> Self {
        let column_index = build_column_index(&column_names);
        Self {
            rows,
            column_names: Arc::new(column_names),
            column_index,
            rows_read: 0,
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub(crate) fn shared_column_names(&self) -> Arc<Vec<String>> {
        Arc::clone(&self.column_names)
    }

    /// Number of rows read so far.
    #[must_use]
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Advance to the next row.
    ///
    /// # Errors
    /// Returns `DataAccessError::StatementFailure` if the driver fails while stepping.
    pub fn next_row(&mut self) -> Result<Option<DbRow>, DataAccessError> {
        let Some(row) = self.rows.next()? else {
            return Ok(None);
        };
        let values = extract_values(row, &self.column_names)?;
        self.rows_read += 1;
        Ok(Some(DbRow::with_index(
            Arc::clone(&self.column_names),
            Arc::clone(&self.column_index),
            values,
        )))
    }
}

impl Iterator for Cursor<'_> {
    type Item = Result<DbRow, DataAccessError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

fn extract_values(row: &Row<'_>, column_names: &[String]) -> Result<Vec<SqlValue>, DataAccessError> {
    let mut values = Vec::with_capacity(column_names.len());
    for (idx, name) in column_names.iter().enumerate() {
        let value = SqlValue::from_value_ref(row.get_ref(idx)?).ok_or_else(|| {
            MappingError::InvalidText {
                column: name.clone(),
            }
        })?;
        values.push(value);
    }
    Ok(values)
}
