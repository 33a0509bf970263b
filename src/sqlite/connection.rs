use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::DriverError;

pub(crate) type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// One open `SQLite` session.
///
/// `rusqlite` is blocking, so every call hops onto tokio's blocking pool. The mutex is only ever
/// taken by the operation that holds this connection's pool slot.
pub struct SqliteConnection {
    conn: SharedSqliteConnection,
}

impl SqliteConnection {
    pub(crate) fn new(conn: rusqlite::Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run synchronous `rusqlite` work against this connection off the async runtime.
    ///
    /// # Errors
    /// Whatever `func` returns, or [`DriverError::Worker`] if the blocking task panicked.
    pub async fn with_connection<F, R>(&self, func: F) -> Result<R, DriverError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<R, DriverError> + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(Arc::clone(&self.conn), func).await
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection").finish_non_exhaustive()
    }
}

pub(crate) async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, DriverError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, DriverError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| DriverError::Worker(format!("sqlite spawn_blocking join error: {e}")))?
}
