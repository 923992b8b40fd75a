//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::auth::UserCredential;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername => "duplicate username: {message}",
    }
}

/// Port for the registered-user store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record with their credential digest.
    async fn create(&self, credential: &UserCredential) -> Result<(), UserPersistenceError>;

    /// Fetch a user and stored digest by username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredential>, UserPersistenceError>;
}
