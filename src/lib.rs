//! Parameterized SQL execution over `rusqlite` with scoped resource release
//! and name-based row mapping.
//!
//! Callers write SQL with positional placeholders, pass the values, and get
//! back either an affected-row count, whatever their own row-mapping function
//! builds from the cursor, or a vector of their own types filled in by column
//! name. Connections come from a [`ConnectionProvider`]; each call acquires
//! one, prepares one statement, and releases both before returning.
//!
//! ```rust,no_run
//! use sql_template::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Row {
//!     id: i64,
//!     name: String,
//! }
//! sql_template::target_shape!(Row { id: i64, name: String });
//!
//! # fn demo() -> Result<(), DataAccessError> {
//! let template = SqlTemplate::new(SqliteProvider::builder("app.db").build()?);
//! template.update("INSERT INTO t (id, name) VALUES (?, ?)", sql_template::params![1, "a"])?;
//! let rows: Vec<Row> = template.query_as("SELECT * FROM t", ())?;
//! let count = template.query_map("SELECT COUNT(*) FROM t", |cursor| {
//!     Ok(cursor.next_row()?.and_then(|row| row.get_by_index(0)?.as_int()))
//! })?;
//! # let _ = (rows, count);
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod mapping;
pub mod params;
pub mod prelude;
pub mod provider;
pub mod results;
pub mod template;
pub mod types;
pub mod view;

#[cfg(feature = "async")]
pub mod async_template;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use error::{DataAccessError, FailureKind, MappingError, RenderError};
pub use executor::{execute_query, execute_update};
pub use mapping::{Field, FromSqlValue, TargetShape, map_all, map_one, map_row};
pub use params::IntoParams;
pub use provider::{ConnectionProvider, SqliteProvider};
pub use results::{Cursor, DbRow, ResultSet};
pub use template::SqlTemplate;
pub use types::SqlValue;
pub use view::{BufferedResponse, JsonView, Model, ResponseSink};

#[cfg(feature = "async")]
pub use async_template::AsyncSqlTemplate;
