//! Port for registration and credential checks used by the auth handlers.
use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::user::{User, UserId, Username};

/// Use-case port backing `POST /api/auth/register` and `POST /api/auth/login`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Register a new account and return its public user record.
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Check credentials and return the authenticated user's id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Fixture user id handed out by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

const FIXTURE_USERNAME: &str = "admin";
const FIXTURE_PASSWORD: &str = "password";

/// Fixture implementation accepting `admin`/`password` only.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = Username::new(credentials.username())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(User::new(UserId::random(), username))
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == FIXTURE_USERNAME && credentials.password() == FIXTURE_PASSWORD
        {
            UserId::new(FIXTURE_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
