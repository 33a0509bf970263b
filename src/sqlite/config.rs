use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RowPoolError;
use crate::pool::{PoolOptions, RowPool};

use super::executor::SqliteDriver;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Options for a `SQLite`-backed pool.
///
/// ```rust
/// use sql_rowpool::prelude::*;
///
/// let opts: SqliteOptions = serde_json::from_str(
///     r#"{ "descriptors": ["app.db", "app.db"], "wal": false }"#,
/// ).unwrap();
/// assert_eq!(opts.busy_timeout_ms, 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteOptions {
    /// One connection is opened per descriptor.
    pub descriptors: Vec<String>,
    /// Switch file databases to WAL journaling when connecting.
    pub wal: bool,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout_ms: u64,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self {
            descriptors: Vec::new(),
            wal: true,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl SqliteOptions {
    pub fn new<I, S>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            descriptors: descriptors.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn builder(descriptors: Vec<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(descriptors)
    }

    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    #[must_use]
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions::new(self.descriptors.iter().cloned())
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(descriptors: Vec<String>) -> Self {
        Self {
            opts: SqliteOptions {
                descriptors,
                ..SqliteOptions::default()
            },
        }
    }

    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.opts.wal = wal;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.opts.busy_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open the pool.
    ///
    /// # Errors
    /// Returns `RowPoolError` if any connection fails to open or answer its ping.
    pub async fn build(self) -> Result<RowPool<SqliteDriver>, RowPoolError> {
        RowPool::from_sqlite_options(self.finish()).await
    }
}

impl RowPool<SqliteDriver> {
    /// Open a `SQLite` pool with default options, one connection per descriptor.
    ///
    /// # Errors
    /// Returns `RowPoolError` if any connection fails to open or answer its ping.
    pub async fn new_sqlite<I, S>(descriptors: I) -> Result<Self, RowPoolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_sqlite_options(SqliteOptions::new(descriptors)).await
    }

    /// # Errors
    /// Returns `RowPoolError` if any connection fails to open or answer its ping.
    pub async fn from_sqlite_options(opts: SqliteOptions) -> Result<Self, RowPoolError> {
        let driver = SqliteDriver::from_options(&opts);
        RowPool::from_options(driver, opts.pool_options()).await
    }
}
