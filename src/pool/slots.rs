use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::driver::Driver;
use crate::error::RowPoolError;

/// Fixed set of open connections guarded by a semaphore.
///
/// Permits and idle connections move together: a permit is only handed out while a connection
/// sits in `idle`, and a connection goes back to `idle` before its permit is released.
pub(crate) struct SlotSet<C> {
    idle: Mutex<Vec<C>>,
    permits: Arc<Semaphore>,
    size: usize,
}

impl<C> SlotSet<C> {
    pub(crate) fn new(conns: Vec<C>) -> Self {
        let size = conns.len();
        Self {
            idle: Mutex::new(conns),
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn available(&self) -> usize {
        self.permits.available_permits()
    }

    fn idle(&self) -> MutexGuard<'_, Vec<C>> {
        match self.idle.lock() {
            Ok(guard) => guard,
            // a panic while holding the lock cannot leave the Vec half-updated
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Wait for a free slot and take its connection. There is no timeout.
    pub(crate) async fn acquire(self: &Arc<Self>) -> Result<PooledConnection<C>, RowPoolError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| RowPoolError::Pool("connection slots closed".to_string()))?;

        let conn = self.idle().pop().ok_or_else(|| {
            RowPoolError::Pool("slot permit granted but no idle connection".to_string())
        })?;

        tracing::debug!(available = self.available(), size = self.size, "slot acquired");
        Ok(PooledConnection {
            conn: Some(conn),
            slots: Arc::clone(self),
            _permit: permit,
        })
    }

    fn release(&self, conn: C) {
        self.idle().push(conn);
    }
}

/// Exclusive loan of one pooled connection.
///
/// Dropping the guard returns the connection to the pool, whatever path the borrowing
/// operation took out (success, error, panic or a cancelled future).
pub struct PooledConnection<C> {
    conn: Option<C>,
    slots: Arc<SlotSet<C>>,
    _permit: OwnedSemaphorePermit,
}

impl<C> Deref for PooledConnection<C> {
    type Target = C;

    fn deref(&self) -> &C {
        // only `Drop` takes the connection out
        self.conn.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl<C> DerefMut for PooledConnection<C> {
    fn deref_mut(&mut self) -> &mut C {
        self.conn.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl<C> Drop for PooledConnection<C> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.slots.release(conn);
            tracing::debug!(
                available = self.slots.available() + 1,
                size = self.slots.size(),
                "slot released"
            );
        }
    }
}

impl<C> std::fmt::Debug for PooledConnection<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledConnection")
            .field("pool_size", &self.slots.size())
            .finish_non_exhaustive()
    }
}

/// Open and ping one connection per descriptor, in order.
///
/// Stops at the first failure; connections opened so far are dropped with the partial `Vec`.
pub(crate) async fn open_all<D: Driver>(
    driver: &D,
    descriptors: &[String],
) -> Result<Vec<D::Connection>, RowPoolError> {
    let mut conns = Vec::with_capacity(descriptors.len());
    for (index, descriptor) in descriptors.iter().enumerate() {
        let mut conn = driver
            .open(descriptor)
            .await
            .map_err(|source| RowPoolError::Open { index, source })?;
        driver
            .ping(&mut conn)
            .await
            .map_err(|source| RowPoolError::Ping { index, source })?;
        conns.push(conn);
    }
    Ok(conns)
}
