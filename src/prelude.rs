//! Convenient imports for common functionality.
//!
//! This module re-exports the types most callers need to run statements and
//! map their results.

pub use crate::config::{SqliteOptions, SqliteOptionsBuilder};
pub use crate::error::{DataAccessError, FailureKind, MappingError, RenderError};
pub use crate::executor::{execute_query, execute_update};
pub use crate::mapping::{Field, FromSqlValue, TargetShape, map_all, map_one, map_row};
pub use crate::params::IntoParams;
pub use crate::provider::{ConnectionProvider, SqliteProvider};
pub use crate::results::{Cursor, DbRow, ResultSet};
pub use crate::template::SqlTemplate;
pub use crate::types::SqlValue;
pub use crate::view::{BufferedResponse, JsonView, Model, ResponseSink};

#[cfg(feature = "async")]
pub use crate::async_template::AsyncSqlTemplate;
