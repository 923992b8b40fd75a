//! Runtime configuration assembled by the binary before the server starts.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use crate::outbound::persistence::DbPool;

/// Cookie-session parameters shared by every worker.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing/encryption key for the private session cookie.
    pub key: Key,
    /// Whether the cookie carries the `Secure` flag (disable for plain HTTP).
    pub secure_cookies: bool,
    /// `SameSite` policy for the session cookie.
    pub same_site: SameSite,
}

/// Everything the server needs to come up.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Assemble a configuration; persistence is attached separately.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
        }
    }

    /// Serve from the given pool instead of the fixture ports.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Address the listener will bind.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
