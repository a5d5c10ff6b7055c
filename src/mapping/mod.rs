//! Name-based mapping of result rows into caller-defined types.
//!
//! A type becomes mappable by deriving (or implementing) `Default` and
//! registering its fields with [`target_shape!`](crate::target_shape!):
//!
//! ```rust
//! use sql_template::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Player {
//!     id: i64,
//!     name: String,
//!     handicap: Option<f64>,
//! }
//!
//! sql_template::target_shape!(Player { id: i64, name: String, handicap: Option<f64> });
//!
//! let names: Vec<&str> = Player::fields().iter().map(Field::name).collect();
//! assert_eq!(names, ["id", "name", "handicap"]);
//! ```
//!
//! Each row is mapped by building `T::default()` and then assigning every
//! registered field from the column with exactly the same name. Column order
//! is irrelevant and extra columns are ignored; a field without a matching
//! column, or a value the field type cannot hold, fails the row.

mod macros;
mod value;

pub use value::FromSqlValue;

use std::fmt;

use crate::error::{DataAccessError, MappingError};
use crate::results::{Cursor, DbRow};
use crate::types::SqlValue;

/// Setter stored in a field registry. Returns `None` when the value is not
/// assignable to the field.
pub type Assign<T> = fn(&mut T, &SqlValue) -> Option<()>;

/// One registered field of a target shape.
pub struct Field<T> {
    name: &'static str,
    type_name: &'static str,
    assign: Assign<T>,
}

impl<T> Field<T> {
    #[must_use]
    pub const fn new(name: &'static str, type_name: &'static str, assign: Assign<T>) -> Self {
        Self {
            name,
            type_name,
            assign,
        }
    }

    /// Field name, which is also the column name it reads.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared field type as written at registration.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn assign(&self, target: &mut T, value: &SqlValue) -> Result<(), MappingError> {
        (self.assign)(target, value).ok_or_else(|| MappingError::IncompatibleType {
            column: self.name.to_owned(),
            expected: self.type_name,
            found: value.type_name(),
        })
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A type that can be constructed empty and populated field by field from a row.
pub trait TargetShape: Default + 'static {
    /// The registered fields, in declaration order.
    fn fields() -> &'static [Field<Self>];
}

/// Map one row into a fresh `T`.
///
/// # Errors
/// Returns `MappingError::MissingColumn` if a field has no column of the same
/// name, or `MappingError::IncompatibleType` if a value cannot be assigned.
pub fn map_row<T: TargetShape>(row: &DbRow) -> Result<T, MappingError> {
    let mut target = T::default();
    for field in T::fields() {
        let value = row
            .get(field.name())
            .ok_or_else(|| MappingError::MissingColumn {
                column: field.name().to_owned(),
            })?;
        field.assign(&mut target, value)?;
    }
    Ok(target)
}

/// Map the next row of the cursor, or `Ok(None)` when the cursor is exhausted.
///
/// # Errors
/// Returns `DataAccessError::MappingFailure` if the row does not fit `T`, or
/// `DataAccessError::StatementFailure` if stepping the cursor fails.
pub fn map_one<T: TargetShape>(cursor: &mut Cursor<'_>) -> Result<Option<T>, DataAccessError> {
    match cursor.next_row()? {
        Some(row) => Ok(Some(map_row(&row)?)),
        None => Ok(None),
    }
}

/// Map every remaining row, in cursor order.
///
/// An empty cursor yields an empty vector. The first row that fails to map
/// aborts the whole call; no partial vector is returned.
///
/// # Errors
/// Same as [`map_one`].
pub fn map_all<T: TargetShape>(cursor: &mut Cursor<'_>) -> Result<Vec<T>, DataAccessError> {
    let mut mapped = Vec::new();
    while let Some(row) = cursor.next_row()? {
        let value = map_row(&row).inspect_err(|err| {
            tracing::debug!(row = cursor.rows_read(), error = %err, "row mapping failed");
        })?;
        mapped.push(value);
    }
    tracing::trace!(rows = mapped.len(), "mapped result rows");
    Ok(mapped)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        id: i64,
        label: Option<String>,
    }

    crate::target_shape!(Pair { id: i64, label: Option<String> });

    fn row(columns: &[&str], values: Vec<SqlValue>) -> DbRow {
        DbRow::new(
            Arc::new(columns.iter().map(|c| (*c).to_string()).collect()),
            values,
        )
    }

    #[test]
    fn maps_by_name_regardless_of_column_order() {
        let row = row(
            &["extra", "label", "id"],
            vec![
                SqlValue::Float(0.5),
                SqlValue::Text("x".into()),
                SqlValue::Int(9),
            ],
        );
        assert_eq!(
            map_row::<Pair>(&row),
            Ok(Pair {
                id: 9,
                label: Some("x".into())
            })
        );
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let row = row(&["id"], vec![SqlValue::Int(1)]);
        assert_eq!(
            map_row::<Pair>(&row),
            Err(MappingError::MissingColumn {
                column: "label".into()
            })
        );
    }

    #[test]
    fn column_names_must_match_case() {
        let row = row(&["ID", "label"], vec![SqlValue::Int(1), SqlValue::Null]);
        assert!(matches!(
            map_row::<Pair>(&row),
            Err(MappingError::MissingColumn { column }) if column == "id"
        ));
    }

    #[test]
    fn map_all_stops_at_the_first_bad_row() {
        let conn = rusqlite::Connection::open_in_memory().expect("in-memory db");
        let mut stmt = conn
            .prepare("SELECT 1 AS id, 'a' AS label UNION ALL SELECT 'two', NULL UNION ALL SELECT 3, 'c'")
            .expect("prepare");
        let rows = stmt.query([]).expect("query");
        let mut cursor = Cursor::new(rows, vec!["id".into(), "label".into()]);

        let err = map_all::<Pair>(&mut cursor).expect_err("second row has text id");
        assert!(matches!(
            err,
            DataAccessError::MappingFailure(MappingError::IncompatibleType { ref column, .. }) if column == "id"
        ));
        assert_eq!(cursor.rows_read(), 2);
    }

    #[test]
    fn incompatible_value_names_both_types() {
        let row = row(
            &["id", "label"],
            vec![SqlValue::Text("one".into()), SqlValue::Null],
        );
        assert_eq!(
            map_row::<Pair>(&row),
            Err(MappingError::IncompatibleType {
                column: "id".into(),
                expected: "i64",
                found: "TEXT",
            })
        );
    }
}
