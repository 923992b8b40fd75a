//! Port abstraction for cart persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::cart::Cart;
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by cart repository adapters.
    pub enum CartPersistenceError {
        /// Repository connection could not be established.
        Connection => "cart repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "cart repository query failed: {message}",
    }
}

/// Port for the single-cart-per-user store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Fetch the cart owned by a user, if one exists.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, CartPersistenceError>;

    /// Insert or replace the user's cart record.
    async fn save(&self, cart: &Cart) -> Result<(), CartPersistenceError>;

    /// Delete the user's cart record. Returns whether a record existed.
    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, CartPersistenceError>;
}

/// Fixture implementation for tests that do not exercise cart persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCartRepository;

#[async_trait]
impl CartRepository for FixtureCartRepository {
    async fn find_by_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<Cart>, CartPersistenceError> {
        Ok(None)
    }

    async fn save(&self, _cart: &Cart) -> Result<(), CartPersistenceError> {
        Ok(())
    }

    async fn delete_by_user(&self, _user_id: &UserId) -> Result<bool, CartPersistenceError> {
        Ok(false)
    }
}
