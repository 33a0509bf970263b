use crate::driver::Driver;
use crate::error::RowPoolError;
use crate::normalize::normalize_args;
use crate::pool::RowPool;
use crate::results::{ExecResult, ResultSet};
use crate::types::{ArgList, SqlArg};

impl<D: Driver> RowPool<D> {
    /// Run a query on a pooled connection and return its rows.
    ///
    /// Arguments are normalized first. The connection goes back to the pool before this returns,
    /// whether the driver call succeeded or not.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use sql_rowpool::prelude::*;
    ///
    /// # async fn demo() -> Result<(), RowPoolError> {
    /// let pool = RowPool::new_sqlite(["file:demo?mode=memory&cache=shared"]).await?;
    /// let rows = pool
    ///     .query("SELECT id, name FROM person WHERE id = ?1", &[SqlArg::Int(1)])
    ///     .await?;
    /// assert_eq!(rows.columns(), ["id", "name"]);
    /// # Ok(()) }
    /// ```
    ///
    /// # Errors
    /// Returns [`RowPoolError::Query`] with the query text and arguments when the driver fails.
    pub async fn query(&self, query: &str, args: &[SqlArg]) -> Result<ResultSet, RowPoolError> {
        let mut conn = self.acquire().await?;
        let args = normalize_args(args);
        tracing::debug!(query, args = %ArgList::from(args.as_ref()), "query");

        self.driver()
            .query(&mut *conn, query, &args)
            .await
            .map_err(|source| {
                tracing::warn!(query, error = %source, "query failed");
                RowPoolError::Query {
                    source,
                    query: query.to_owned(),
                    args: ArgList::from(args.as_ref()),
                }
            })
    }

    /// Execute a statement on a pooled connection.
    ///
    /// Same acquisition, normalization and release discipline as [`RowPool::query`].
    ///
    /// # Errors
    /// Returns [`RowPoolError::Exec`] with the query text and arguments when the driver fails.
    pub async fn exec(&self, query: &str, args: &[SqlArg]) -> Result<ExecResult, RowPoolError> {
        let mut conn = self.acquire().await?;
        let args = normalize_args(args);
        tracing::debug!(query, args = %ArgList::from(args.as_ref()), "exec");

        self.driver()
            .exec(&mut *conn, query, &args)
            .await
            .map_err(|source| {
                tracing::warn!(query, error = %source, "exec failed");
                RowPoolError::Exec {
                    source,
                    query: query.to_owned(),
                    args: ArgList::from(args.as_ref()),
                }
            })
    }
}
