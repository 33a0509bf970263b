//! Convenient imports for common functionality.
//!
//! ```rust
//! use sql_rowpool::prelude::*;
//! ```

pub use crate::driver::Driver;
pub use crate::error::{DriverError, RowPoolError};
pub use crate::mapping::{ColumnField, Record, map_row};
pub use crate::normalize::normalize_args;
pub use crate::pool::{PoolOptions, PooledConnection, RowPool};
pub use crate::results::{ExecResult, RawRow, ResultSet};
pub use crate::types::{ArgList, SqlArg};
pub use crate::{impl_record, sql_text_type};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteDriver, SqliteOptions, SqliteOptionsBuilder};
