use std::sync::Arc;

use super::cursor::Cursor;
use super::row::DbRow;
use crate::error::DataAccessError;

/// Every row of a query, materialised.
///
/// [`ResultSet::from_cursor`] is itself a row-mapping function, for callers
/// that want the raw rows rather than a target shape.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows in database order
    pub results: Vec<DbRow>,
    column_names: Arc<Vec<String>>,
}

impl ResultSet {
    /// Drain a cursor into a result set.
    ///
    /// # Errors
    /// Returns `DataAccessError::StatementFailure` if stepping the cursor fails.
    pub fn from_cursor(cursor: &mut Cursor<'_>) -> Result<ResultSet, DataAccessError> {
        let column_names = cursor.shared_column_names();
        let mut results = Vec::new();
        while let Some(row) = cursor.next_row()? {
            results.push(row);
        }
        Ok(ResultSet {
            results,
            column_names,
        })
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Rows as a JSON array of objects.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.results.iter().map(DbRow::to_json).collect())
    }
}
