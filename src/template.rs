use crate::error::DataAccessError;
use crate::executor::{execute_query, execute_update};
use crate::mapping::{TargetShape, map_all, map_one};
use crate::params::IntoParams;
use crate::provider::ConnectionProvider;
use crate::results::{Cursor, ResultSet};

/// Convenience entry points over [`execute_update`] and [`execute_query`].
///
/// The template holds nothing but its provider. Every call acquires its own
/// connection, so one template can be shared freely between threads when
/// the provider allows it.
///
/// ```rust,no_run
/// use sql_template::prelude::*;
///
/// #[derive(Debug, Default)]
/// struct Item {
///     id: i64,
///     name: String,
/// }
/// sql_template::target_shape!(Item { id: i64, name: String });
///
/// # fn demo() -> Result<(), DataAccessError> {
/// let template = SqlTemplate::new(SqliteProvider::builder("app.db").build()?);
/// template.update("CREATE TABLE t (id INTEGER, name TEXT)", ())?;
/// template.update("INSERT INTO t (id, name) VALUES (?, ?)", sql_template::params![1, "a"])?;
/// let items: Vec<Item> = template.query_as("SELECT * FROM t WHERE id = ?", [SqlValue::Int(1)])?;
/// # let _ = items;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct SqlTemplate<P> {
    provider: P,
}

impl<P: ConnectionProvider> SqlTemplate<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Execute a statement and return the number of affected rows.
    ///
    /// # Errors
    /// Returns `DataAccessError` if acquisition, preparation, binding or execution fails.
    pub fn update<'p>(&self, sql: &str, params: impl IntoParams<'p>) -> Result<usize, DataAccessError> {
        execute_update(&self.provider, sql, &params.into_params())
    }

    /// Run a query and pass its cursor to a caller-supplied row-mapping function.
    ///
    /// # Errors
    /// Returns `DataAccessError` if the query fails or `mapper` returns an error.
    pub fn query_with<'p, T, F>(
        &self,
        sql: &str,
        params: impl IntoParams<'p>,
        mapper: F,
    ) -> Result<T, DataAccessError>
    where
        F: FnOnce(&mut Cursor<'_>) -> Result<T, DataAccessError>,
    {
        execute_query(&self.provider, sql, &params.into_params(), mapper)
    }

    /// [`query_with`](Self::query_with) for statements without placeholders.
    ///
    /// # Errors
    /// Same as [`query_with`](Self::query_with).
    pub fn query_map<T, F>(&self, sql: &str, mapper: F) -> Result<T, DataAccessError>
    where
        F: FnOnce(&mut Cursor<'_>) -> Result<T, DataAccessError>,
    {
        execute_query(&self.provider, sql, &[], mapper)
    }

    /// Run a query and map every row into `T` by column name.
    ///
    /// # Errors
    /// Returns `DataAccessError::MappingFailure` if any row does not fit `T`;
    /// no partial result is returned.
    pub fn query_as<'p, T: TargetShape>(
        &self,
        sql: &str,
        params: impl IntoParams<'p>,
    ) -> Result<Vec<T>, DataAccessError> {
        self.query_with(sql, params, map_all::<T>)
    }

    /// Run a query and map only its first row, `None` if there is none.
    ///
    /// # Errors
    /// Same as [`query_as`](Self::query_as), for the first row only.
    pub fn query_one_as<'p, T: TargetShape>(
        &self,
        sql: &str,
        params: impl IntoParams<'p>,
    ) -> Result<Option<T>, DataAccessError> {
        self.query_with(sql, params, map_one::<T>)
    }

    /// Run a query and materialise all rows without mapping.
    ///
    /// # Errors
    /// Returns `DataAccessError` if the query fails.
    pub fn query_rows<'p>(
        &self,
        sql: &str,
        params: impl IntoParams<'p>,
    ) -> Result<ResultSet, DataAccessError> {
        self.query_with(sql, params, ResultSet::from_cursor)
    }
}
