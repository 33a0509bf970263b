use crate::driver::Driver;
use crate::error::RowPoolError;
use crate::pool::RowPool;
use crate::types::{ArgList, SqlArg};

use super::{Record, map_row};

impl<D: Driver> RowPool<D> {
    /// Map every row of `query` onto a new `R`, appending to `out` in result order.
    ///
    /// `out` must be empty. It is only extended once every row mapped successfully, so on error
    /// it is left empty.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use sql_rowpool::prelude::*;
    ///
    /// #[derive(Debug, Default)]
    /// struct Person {
    ///     id: u64,
    ///     name: String,
    /// }
    /// impl_record!(Person { id, name });
    ///
    /// # async fn demo(pool: RowPool<SqliteDriver>) -> Result<(), RowPoolError> {
    /// let mut people: Vec<Person> = Vec::new();
    /// pool.select(&mut people, "SELECT id, name FROM person ORDER BY id", &[])
    ///     .await?;
    /// # Ok(()) }
    /// ```
    ///
    /// # Errors
    /// [`RowPoolError::Shape`] for a non-empty `out` (checked before touching the database),
    /// driver errors from [`RowPool::query`], and mapping errors naming the row and column.
    pub async fn select<R: Record>(
        &self,
        out: &mut Vec<R>,
        query: &str,
        args: &[SqlArg],
    ) -> Result<(), RowPoolError> {
        if !out.is_empty() {
            return Err(RowPoolError::Shape {
                operation: "select",
                message: format!("expects an empty collection, got {} items", out.len()),
            });
        }

        let rows = self.query(query, args).await?;
        let columns = rows.column_names();
        let records = rows
            .enumerate()
            .map(|(index, row)| map_row(index, &columns, &row))
            .collect::<Result<Vec<R>, _>>()?;

        out.extend(records);
        Ok(())
    }

    /// Map the single row of `query` onto a new `R` stored in `out`.
    ///
    /// `out` is only written when exactly one row came back.
    ///
    /// # Errors
    /// [`RowPoolError::NoRows`] ("got none"), [`RowPoolError::MultipleRows`]
    /// ("got multiple rows"), driver errors and mapping errors.
    pub async fn select_one<R: Record>(
        &self,
        out: &mut Option<R>,
        query: &str,
        args: &[SqlArg],
    ) -> Result<(), RowPoolError> {
        let mut rows = self.query(query, args).await?;
        let columns = rows.column_names();

        let Some(first) = rows.next() else {
            return Err(RowPoolError::NoRows {
                query: query.to_owned(),
                args: ArgList::from(args),
            });
        };
        let record = map_row(0, &columns, &first)?;

        if rows.next().is_some() {
            return Err(RowPoolError::MultipleRows {
                query: query.to_owned(),
                args: ArgList::from(args),
            });
        }

        *out = Some(record);
        Ok(())
    }
}
