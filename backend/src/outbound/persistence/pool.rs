//! Shared PostgreSQL connection pool for the repository adapters.
//!
//! Every repository holds a clone of [`DbPool`] and checks a connection out
//! per operation; shop requests issue at most two queries each, so checkout
//! latency dominates and the pool is sized for short, bursty usage.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Failures raised while building the pool or acquiring a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection could be acquired within the configured timeout.
    #[error("no database connection available: {message}")]
    Acquire { message: String },

    /// The pool itself could not be constructed.
    #[error("database pool setup failed: {message}")]
    Setup { message: String },
}

impl PoolError {
    /// Build an [`PoolError::Acquire`] from any displayable cause.
    pub fn acquire(message: impl Into<String>) -> Self {
        Self::Acquire {
            message: message.into(),
        }
    }

    /// Build a [`PoolError::Setup`] from any displayable cause.
    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup {
            message: message.into(),
        }
    }
}

/// Pool sizing and timeout knobs.
///
/// Defaults suit a small catalog service: ten connections, two kept idle,
/// thirty-second acquire timeout.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_connections: u32,
    idle_floor: Option<u32>,
    acquire_timeout: Duration,
}

impl PoolConfig {
    /// Configuration for the given database URL with default sizing.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            idle_floor: Some(2),
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// Cap the number of simultaneously open connections.
    pub fn max_connections(mut self, limit: u32) -> Self {
        self.max_connections = limit;
        self
    }

    /// Keep at least this many idle connections warm (`None` to disable).
    pub fn idle_floor(mut self, floor: Option<u32>) -> Self {
        self.idle_floor = floor;
        self
    }

    /// How long a checkout may wait before failing with [`PoolError::Acquire`].
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

/// Cloneable handle to the bb8-managed `diesel-async` pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool.
    ///
    /// # Errors
    /// Returns [`PoolError::Setup`] when the manager rejects the database URL
    /// or the initial connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);

        let inner = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(config.idle_floor)
            .connection_timeout(config.acquire_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::setup(err.to_string()))?;

        Ok(Self { inner })
    }

    /// Check a connection out of the pool.
    ///
    /// # Errors
    /// Returns [`PoolError::Acquire`] when the timeout elapses first.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::acquire(err.to_string()))
    }
}
