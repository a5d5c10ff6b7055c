use std::sync::Arc;

use crate::error::DataAccessError;
use crate::mapping::TargetShape;
use crate::provider::ConnectionProvider;
use crate::results::{Cursor, ResultSet};
use crate::template::SqlTemplate;
use crate::types::SqlValue;

/// Async front for [`SqlTemplate`].
///
/// Each call moves its SQL and parameters onto tokio's blocking pool and runs
/// the synchronous template there, keeping driver work off the async runtime.
#[derive(Debug)]
pub struct AsyncSqlTemplate<P> {
    inner: Arc<SqlTemplate<P>>,
}

impl<P> Clone for AsyncSqlTemplate<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> AsyncSqlTemplate<P>
where
    P: ConnectionProvider + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self::from_template(SqlTemplate::new(provider))
    }

    #[must_use]
    pub fn from_template(template: SqlTemplate<P>) -> Self {
        Self {
            inner: Arc::new(template),
        }
    }

    /// The wrapped synchronous template.
    #[must_use]
    pub fn blocking(&self) -> &SqlTemplate<P> {
        &self.inner
    }

    /// # Errors
    /// See [`SqlTemplate::update`].
    pub async fn update(
        &self,
        sql: impl Into<String>,
        params: Vec<SqlValue>,
    ) -> Result<usize, DataAccessError> {
        let sql = sql.into();
        self.run(move |template| template.update(&sql, params)).await
    }

    /// # Errors
    /// See [`SqlTemplate::query_with`].
    pub async fn query_with<T, F>(
        &self,
        sql: impl Into<String>,
        params: Vec<SqlValue>,
        mapper: F,
    ) -> Result<T, DataAccessError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Cursor<'_>) -> Result<T, DataAccessError> + Send + 'static,
    {
        let sql = sql.into();
        self.run(move |template| template.query_with(&sql, params, mapper))
            .await
    }

    /// # Errors
    /// See [`SqlTemplate::query_as`].
    pub async fn query_as<T>(
        &self,
        sql: impl Into<String>,
        params: Vec<SqlValue>,
    ) -> Result<Vec<T>, DataAccessError>
    where
        T: TargetShape + Send + 'static,
    {
        let sql = sql.into();
        self.run(move |template| template.query_as::<T>(&sql, params))
            .await
    }

    /// # Errors
    /// See [`SqlTemplate::query_one_as`].
    pub async fn query_one_as<T>(
        &self,
        sql: impl Into<String>,
        params: Vec<SqlValue>,
    ) -> Result<Option<T>, DataAccessError>
    where
        T: TargetShape + Send + 'static,
    {
        let sql = sql.into();
        self.run(move |template| template.query_one_as::<T>(&sql, params))
            .await
    }

    /// # Errors
    /// See [`SqlTemplate::query_rows`].
    pub async fn query_rows(
        &self,
        sql: impl Into<String>,
        params: Vec<SqlValue>,
    ) -> Result<ResultSet, DataAccessError> {
        let sql = sql.into();
        self.run(move |template| template.query_rows(&sql, params))
            .await
    }

    async fn run<F, R>(&self, func: F) -> Result<R, DataAccessError>
    where
        F: FnOnce(&SqlTemplate<P>) -> Result<R, DataAccessError> + Send + 'static,
        R: Send + 'static,
    {
        let template = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || func(&template))
            .await
            .map_err(|e| DataAccessError::WorkerFailure(format!("spawn_blocking join error: {e}")))?
    }
}
