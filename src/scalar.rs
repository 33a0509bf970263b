//! Single-value readers: zero or one row, exactly one column.

use crate::driver::Driver;
use crate::error::RowPoolError;
use crate::mapping::ColumnField;
use crate::pool::RowPool;
use crate::types::{ArgList, SqlArg};

impl<D: Driver> RowPool<D> {
    /// Read one signed integer. `Ok(None)` when the query returns no row.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use sql_rowpool::prelude::*;
    ///
    /// # async fn demo(pool: RowPool<SqliteDriver>) -> Result<(), RowPoolError> {
    /// let count = pool.select_int("SELECT COUNT(*) FROM person", &[]).await?;
    /// assert!(count.is_some());
    /// # Ok(()) }
    /// ```
    ///
    /// # Errors
    /// See [`RowPool::select_string`].
    pub async fn select_int(
        &self,
        query: &str,
        args: &[SqlArg],
    ) -> Result<Option<i64>, RowPoolError> {
        self.select_scalar(query, args).await
    }

    /// Read one unsigned integer. `Ok(None)` when the query returns no row.
    ///
    /// # Errors
    /// See [`RowPool::select_string`].
    pub async fn select_uint(
        &self,
        query: &str,
        args: &[SqlArg],
    ) -> Result<Option<u64>, RowPoolError> {
        self.select_scalar(query, args).await
    }

    /// Read one text value. `Ok(None)` when the query returns no row.
    ///
    /// # Errors
    /// Driver errors, [`RowPoolError::ColumnCount`] when a row came back with other than exactly
    /// one column (an empty result is `Ok(None)` whatever its width),
    /// [`RowPoolError::TooManyRows`] when a second row exists, and
    /// [`RowPoolError::Conversion`] for NULL or unparsable values.
    pub async fn select_string(
        &self,
        query: &str,
        args: &[SqlArg],
    ) -> Result<Option<String>, RowPoolError> {
        self.select_scalar(query, args).await
    }

    async fn select_scalar<T: ColumnField>(
        &self,
        query: &str,
        args: &[SqlArg],
    ) -> Result<Option<T>, RowPoolError> {
        let mut rows = self.query(query, args).await?;
        let Some(row) = rows.next() else {
            return Ok(None);
        };
        if rows.columns().len() != 1 {
            return Err(RowPoolError::ColumnCount {
                expected: 1,
                actual: rows.columns().len(),
                query: query.to_owned(),
            });
        }
        let column = &rows.columns()[0];
        let raw = row.get(0).ok_or_else(|| RowPoolError::Conversion {
            row: 0,
            column: column.clone(),
            message: "NULL cannot be read as a scalar".to_string(),
        })?;
        let value = T::from_column(raw).map_err(|err| err.at(0, column))?;

        if rows.next().is_some() {
            return Err(RowPoolError::TooManyRows {
                query: query.to_owned(),
                args: ArgList::from(args),
            });
        }
        Ok(Some(value))
    }
}
