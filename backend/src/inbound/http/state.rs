//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CartRepository, LoginService, OrderRepository, ProductRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub products: Arc<dyn ProductRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureCartRepository, FixtureLoginService, FixtureOrderRepository,
    ///     FixtureProductRepository,
    /// };
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixtureProductRepository),
    ///     Arc::new(FixtureCartRepository),
    ///     Arc::new(FixtureOrderRepository),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        products: Arc<dyn ProductRepository>,
        carts: Arc<dyn CartRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            login,
            products,
            carts,
            orders,
        }
    }

    /// State wired entirely to fixtures, for tests and DB-less development.
    pub fn fixtures() -> Self {
        use crate::domain::ports::{
            FixtureCartRepository, FixtureLoginService, FixtureOrderRepository,
            FixtureProductRepository,
        };

        Self::new(
            Arc::new(FixtureLoginService),
            Arc::new(FixtureProductRepository),
            Arc::new(FixtureCartRepository),
            Arc::new(FixtureOrderRepository),
        )
    }
}
