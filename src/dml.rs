//! Statement helpers built on `exec`.

use crate::driver::Driver;
use crate::error::RowPoolError;
use crate::pool::RowPool;
use crate::types::{ArgList, SqlArg};

impl<D: Driver> RowPool<D> {
    /// Execute a statement that must change exactly one row.
    ///
    /// # Errors
    /// [`RowPoolError::RowsAffected`] naming the actual count, query and arguments when the count
    /// is not 1, plus driver errors.
    pub async fn update_one(&self, query: &str, args: &[SqlArg]) -> Result<(), RowPoolError> {
        let res = self.exec(query, args).await?;
        if res.rows_affected != 1 {
            return Err(RowPoolError::RowsAffected {
                affected: res.rows_affected,
                query: query.to_owned(),
                args: ArgList::from(args),
            });
        }
        Ok(())
    }

    /// Execute an insert and return the identifier the database generated for it.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use sql_rowpool::prelude::*;
    ///
    /// # async fn demo(pool: RowPool<SqliteDriver>) -> Result<(), RowPoolError> {
    /// let id = pool
    ///     .insert("INSERT INTO person (name) VALUES (?1)", &["Alice".into()])
    ///     .await?;
    /// assert!(id > 0);
    /// # Ok(()) }
    /// ```
    ///
    /// # Errors
    /// Driver errors, or [`RowPoolError::LastInsertIdUnavailable`] when the driver cannot report
    /// generated identifiers.
    pub async fn insert(&self, query: &str, args: &[SqlArg]) -> Result<i64, RowPoolError> {
        let res = self.exec(query, args).await?;
        res.last_insert_id
            .ok_or_else(|| RowPoolError::LastInsertIdUnavailable {
                query: query.to_owned(),
                args: ArgList::from(args),
            })
    }

    /// [`RowPool::insert`] for statements whose generated identifier does not matter.
    ///
    /// Unlike `insert`, a driver that cannot report identifiers is not an error here.
    ///
    /// # Errors
    /// Driver errors.
    pub async fn insert_ignore_id(&self, query: &str, args: &[SqlArg]) -> Result<(), RowPoolError> {
        self.exec(query, args).await.map(|_| ())
    }
}
