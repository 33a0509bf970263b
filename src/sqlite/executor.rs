use std::time::Duration;

use async_trait::async_trait;
use rusqlite::params_from_iter;

use crate::driver::Driver;
use crate::error::DriverError;
use crate::results::{ExecResult, ResultSet};
use crate::types::SqlArg;

use super::config::SqliteOptions;
use super::connection::SqliteConnection;
use super::params::Params;
use super::query::build_result_set;

/// [`Driver`] backed by `rusqlite`.
///
/// Descriptors are anything `rusqlite::Connection::open` accepts: a file path, `:memory:`, or a
/// `file:` URI such as `file:app?mode=memory&cache=shared`.
#[derive(Debug, Clone)]
pub struct SqliteDriver {
    wal: bool,
    busy_timeout: Duration,
}

impl Default for SqliteDriver {
    fn default() -> Self {
        Self::from_options(&SqliteOptions::default())
    }
}

impl SqliteDriver {
    #[must_use]
    pub fn from_options(opts: &SqliteOptions) -> Self {
        Self {
            wal: opts.wal,
            busy_timeout: opts.busy_timeout(),
        }
    }
}

#[async_trait]
impl Driver for SqliteDriver {
    type Connection = SqliteConnection;

    async fn open(&self, descriptor: &str) -> Result<SqliteConnection, DriverError> {
        let path = descriptor.to_owned();
        let wal = self.wal;
        let busy_timeout = self.busy_timeout;

        let conn = tokio::task::spawn_blocking(move || -> Result<_, DriverError> {
            let conn = rusqlite::Connection::open(&path)?;
            conn.busy_timeout(busy_timeout)?;
            if wal {
                // in-memory databases answer "memory" and stay as they are
                let mode: String = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                    row.get(0)
                })?;
                tracing::debug!(path = %path, mode = %mode, "sqlite journal mode");
            }
            Ok(conn)
        })
        .await
        .map_err(|e| DriverError::Worker(format!("sqlite open join error: {e}")))??;

        Ok(SqliteConnection::new(conn))
    }

    async fn ping(&self, conn: &mut SqliteConnection) -> Result<(), DriverError> {
        conn.with_connection(|c| {
            c.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }

    async fn query(
        &self,
        conn: &mut SqliteConnection,
        query: &str,
        args: &[SqlArg],
    ) -> Result<ResultSet, DriverError> {
        let params = Params::convert(args)?;
        let query = query.to_owned();
        conn.with_connection(move |c| {
            let mut stmt = c.prepare(&query)?;
            build_result_set(&mut stmt, params.as_values())
        })
        .await
    }

    async fn exec(
        &self,
        conn: &mut SqliteConnection,
        query: &str,
        args: &[SqlArg],
    ) -> Result<ExecResult, DriverError> {
        let params = Params::convert(args)?;
        let query = query.to_owned();
        conn.with_connection(move |c| {
            let changed = c.execute(&query, params_from_iter(params.as_values().iter()))?;
            Ok(ExecResult::new(changed as u64, Some(c.last_insert_rowid())))
        })
        .await
    }
}
