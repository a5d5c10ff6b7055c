use std::collections::HashMap;
use std::sync::Arc;

use crate::types::SqlValue;

/// Column name to position lookup shared by every row of one query.
pub(crate) type ColumnIndex = Arc<HashMap<String, usize>>;

pub(crate) fn build_column_index(column_names: &[String]) -> ColumnIndex {
    // Duplicate names (e.g. from a join) resolve to the first occurrence
    let mut index = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        index.entry(name.clone()).or_insert(i);
    }
    Arc::new(index)
}

/// One row read from a [`Cursor`](super::Cursor).
///
/// Column names and the name lookup table are shared with the other rows of
/// the same query, so only the values are owned per row.
#[derive(Debug, Clone)]
pub struct DbRow {
    column_names: Arc<Vec<String>>,
    column_index: ColumnIndex,
    values: Vec<SqlValue>,
}

impl DbRow {
    /// Create a row from column names and the values in the same order.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<SqlValue>) -> Self {
        let column_index = build_column_index(&column_names);
        Self {
            column_names,
            column_index,
            values,
        }
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index: ColumnIndex,
        values: Vec<SqlValue>,
    ) -> Self {
        Self {
            column_names,
            column_index,
            values,
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Position of a column. Names are compared exactly, case included.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index.get(column_name).copied()
    }

    /// Value of the named column, or `None` if the row has no such column.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&SqlValue> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The row as a JSON object keyed by column name.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .column_names
            .iter()
            .zip(&self.values)
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(object)
    }
}
