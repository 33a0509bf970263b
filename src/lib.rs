//! Fixed-size connection pool with row-to-record mapping.
//!
//! A [`RowPool`] opens one connection per descriptor up front and lends them out to one
//! operation at a time. On top of plain [`RowPool::query`] and [`RowPool::exec`] it offers
//! scalar reads (`select_int`, `select_uint`, `select_string`), DML helpers (`update_one`,
//! `insert`, `insert_ignore_id`) and record mapping (`select`, `select_one`) for any type that
//! implements [`Record`], usually via [`impl_record!`].
//!
//! ```rust,no_run
//! use sql_rowpool::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     id: i64,
//!     name: String,
//! }
//! impl_record!(Person { id, name });
//!
//! # async fn demo() -> Result<(), RowPoolError> {
//! let pool = RowPool::new_sqlite(["people.db", "people.db"]).await?;
//! let mut people: Vec<Person> = Vec::new();
//! pool.select(&mut people, "SELECT id, name FROM person ORDER BY id", &[]).await?;
//! # Ok(()) }
//! ```

pub mod driver;
pub mod error;
pub mod mapping;
pub mod normalize;
pub mod pool;
pub mod prelude;
pub mod results;
pub mod types;

mod dml;
mod executor;
mod macros;
mod scalar;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use driver::Driver;
pub use error::{DriverError, RowPoolError};
pub use mapping::{ColumnField, FieldError, FieldKind, Record, map_row};
pub use normalize::normalize_args;
pub use pool::{PoolOptions, PooledConnection, RowPool};
pub use results::{ExecResult, RawRow, ResultSet};
pub use types::{ArgList, SqlArg};

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteConnection, SqliteDriver, SqliteOptions, SqliteOptionsBuilder};
