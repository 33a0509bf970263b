mod config;
mod slots;

use std::sync::Arc;

pub use config::PoolOptions;
pub use slots::PooledConnection;

use crate::driver::Driver;
use crate::error::RowPoolError;
use slots::{SlotSet, open_all};

/// A fixed-size pool of live connections plus the driver that runs statements on them.
///
/// Cloning is cheap and every clone shares the same slots. All query helpers (`query`, `exec`,
/// `select`, `select_one`, `select_int`, `update_one`, `insert`, ...) are methods on this type;
/// each one borrows a connection for its own duration only.
pub struct RowPool<D: Driver> {
    inner: Arc<PoolInner<D>>,
}

struct PoolInner<D: Driver> {
    driver: D,
    slots: Arc<SlotSet<D::Connection>>,
}

impl<D: Driver> Clone for RowPool<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: Driver> std::fmt::Debug for RowPool<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowPool")
            .field("size", &self.size())
            .field("available", &self.available())
            .finish()
    }
}

impl<D: Driver> RowPool<D> {
    /// Open and ping one connection per descriptor, in order.
    ///
    /// Construction is all-or-nothing: the first open or ping failure is returned and every
    /// connection opened before it is dropped.
    ///
    /// # Errors
    /// [`RowPoolError::Config`] for an empty descriptor list, [`RowPoolError::Open`] or
    /// [`RowPoolError::Ping`] carrying the index of the failing descriptor.
    pub async fn connect<I, S>(driver: D, descriptors: I) -> Result<Self, RowPoolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_options(driver, PoolOptions::new(descriptors)).await
    }

    /// Build a pool from [`PoolOptions`].
    ///
    /// # Errors
    /// Same as [`RowPool::connect`].
    pub async fn from_options(driver: D, options: PoolOptions) -> Result<Self, RowPoolError> {
        options.validate()?;
        let conns = open_all(&driver, &options.descriptors).await?;
        tracing::info!(size = conns.len(), "connection pool ready");
        Ok(Self {
            inner: Arc::new(PoolInner {
                driver,
                slots: Arc::new(SlotSet::new(conns)),
            }),
        })
    }

    /// Borrow a connection, waiting as long as it takes for one to be free.
    ///
    /// Dropping the returned guard gives the connection back.
    ///
    /// # Errors
    /// Returns [`RowPoolError::Pool`] only if the slot bookkeeping is broken.
    pub async fn acquire(&self) -> Result<PooledConnection<D::Connection>, RowPoolError> {
        self.inner.slots.acquire().await
    }

    /// Number of connections owned by the pool.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.slots.size()
    }

    /// Number of connections not currently lent out.
    #[must_use]
    pub fn available(&self) -> usize {
        self.inner.slots.available()
    }

    #[must_use]
    pub fn driver(&self) -> &D {
        &self.inner.driver
    }
}
