//! The boundary to the underlying database driver.

use async_trait::async_trait;

use crate::error::DriverError;
use crate::results::{ExecResult, ResultSet};
use crate::types::SqlArg;

/// Opens connections and runs statements on them.
///
/// The pool owns every `Connection` it gets from [`Driver::open`] and lends each one to a single
/// operation at a time, so implementations never see concurrent calls on the same connection.
/// Query results come back as textual bytes (see [`RawRow`](crate::results::RawRow)); the pool
/// does all typed decoding.
#[async_trait]
pub trait Driver: Send + Sync + 'static {
    type Connection: Send + 'static;

    /// Open one session described by `descriptor` (a path, URL or DSN, driver-specific).
    async fn open(&self, descriptor: &str) -> Result<Self::Connection, DriverError>;

    /// Liveness probe run once per connection while the pool is built.
    async fn ping(&self, conn: &mut Self::Connection) -> Result<(), DriverError>;

    async fn query(
        &self,
        conn: &mut Self::Connection,
        query: &str,
        args: &[SqlArg],
    ) -> Result<ResultSet, DriverError>;

    async fn exec(
        &self,
        conn: &mut Self::Connection,
        query: &str,
        args: &[SqlArg],
    ) -> Result<ExecResult, DriverError>;
}
