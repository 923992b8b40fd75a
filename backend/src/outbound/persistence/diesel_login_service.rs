//! `LoginService` adapter composed over the user repository port.
//!
//! Registration stores a new user with their credential digest; login checks
//! the submitted password against the stored digest. Raw passwords never
//! reach this adapter's queries.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository};
use crate::domain::{Error, LoginCredentials, User, UserCredential, UserId, Username};

use super::diesel_user_repository::DieselUserRepository;

/// Diesel-backed `LoginService` checking credentials against stored digests.
#[derive(Clone)]
pub struct DieselLoginService {
    user_repository: Arc<dyn UserRepository>,
}

impl DieselLoginService {
    /// Service backed by the Diesel user repository.
    pub fn new(user_repository: DieselUserRepository) -> Self {
        Self {
            user_repository: Arc::new(user_repository),
        }
    }

    #[cfg(test)]
    fn from_repository(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::conflict("username already registered")
        }
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = Username::new(credentials.username())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let user = User::new(UserId::random(), username);
        let credential = UserCredential::new(user.clone(), credentials.digest());

        self.user_repository
            .create(&credential)
            .await
            .map_err(map_persistence_error)?;

        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let stored = self
            .user_repository
            .find_by_username(credentials.username())
            .await
            .map_err(map_persistence_error)?;

        match stored {
            Some(credential) if credential.digest().matches(credentials.password()) => {
                Ok(credential.user().id().clone())
            }
            // Same error for unknown user and wrong password.
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for registration and credential checks.
    use std::sync::Mutex;

    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[derive(Clone, Copy)]
    enum StubFailure {
        Connection,
        Query,
    }

    impl StubFailure {
        fn to_error(self) -> UserPersistenceError {
            match self {
                Self::Connection => UserPersistenceError::connection("database unavailable"),
                Self::Query => UserPersistenceError::query("database query failed"),
            }
        }
    }

    #[derive(Default)]
    struct StubState {
        stored: Vec<UserCredential>,
        find_failure: Option<StubFailure>,
        create_failure: Option<StubFailure>,
    }

    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<StubState>,
    }

    impl StubUserRepository {
        fn with_credential(credential: UserCredential) -> Self {
            Self {
                state: Mutex::new(StubState {
                    stored: vec![credential],
                    ..StubState::default()
                }),
            }
        }

        fn set_find_failure(&self, failure: StubFailure) {
            self.state.lock().expect("state lock").find_failure = Some(failure);
        }

        fn set_create_failure(&self, failure: StubFailure) {
            self.state.lock().expect("state lock").create_failure = Some(failure);
        }

        fn stored_usernames(&self) -> Vec<String> {
            self.state
                .lock()
                .expect("state lock")
                .stored
                .iter()
                .map(|c| c.user().username().to_string())
                .collect()
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn create(&self, credential: &UserCredential) -> Result<(), UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            if let Some(failure) = state.create_failure {
                return Err(failure.to_error());
            }
            if state
                .stored
                .iter()
                .any(|c| c.user().username() == credential.user().username())
            {
                return Err(UserPersistenceError::duplicate_username(
                    credential.user().username().as_ref(),
                ));
            }
            state.stored.push(credential.clone());
            Ok(())
        }

        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserCredential>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if let Some(failure) = state.find_failure {
                return Err(failure.to_error());
            }
            Ok(state
                .stored
                .iter()
                .find(|c| c.user().username().as_ref() == username)
                .cloned())
        }
    }

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("valid test credentials")
    }

    fn stored_credential(username: &str, password: &str) -> UserCredential {
        let user = User::new(
            UserId::random(),
            Username::new(username).expect("valid username"),
        );
        UserCredential::new(user, credentials(username, password).digest())
    }

    #[tokio::test]
    async fn register_stores_the_new_user() {
        let repository = Arc::new(StubUserRepository::default());
        let service = DieselLoginService::from_repository(repository.clone());

        let user = service
            .register(&credentials("ada", "secret"))
            .await
            .expect("registration succeeds");

        assert_eq!(user.username().as_ref(), "ada");
        assert_eq!(repository.stored_usernames(), vec!["ada".to_owned()]);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_usernames_with_conflict() {
        let repository = Arc::new(StubUserRepository::with_credential(stored_credential(
            "ada", "secret",
        )));
        let service = DieselLoginService::from_repository(repository);

        let err = service
            .register(&credentials("ada", "other"))
            .await
            .expect_err("duplicate must fail");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "username already registered");
    }

    #[tokio::test]
    async fn register_rejects_invalid_usernames() {
        let repository = Arc::new(StubUserRepository::default());
        let service = DieselLoginService::from_repository(repository.clone());

        let err = service
            .register(&credentials("ab", "secret"))
            .await
            .expect_err("too-short username must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(repository.stored_usernames().is_empty());
    }

    #[tokio::test]
    async fn authenticate_accepts_the_registered_password() {
        let credential = stored_credential("ada", "secret");
        let expected_id = credential.user().id().clone();
        let repository = Arc::new(StubUserRepository::with_credential(credential));
        let service = DieselLoginService::from_repository(repository);

        let user_id = service
            .authenticate(&credentials("ada", "secret"))
            .await
            .expect("valid credentials authenticate");

        assert_eq!(user_id, expected_id);
    }

    #[rstest]
    #[case("ada", "wrong-password")]
    #[case("unknown", "secret")]
    #[tokio::test]
    async fn authenticate_rejects_bad_credentials(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let repository = Arc::new(StubUserRepository::with_credential(stored_credential(
            "ada", "secret",
        )));
        let service = DieselLoginService::from_repository(repository);

        let err = service
            .authenticate(&credentials(username, password))
            .await
            .expect_err("bad credentials must fail");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    #[rstest]
    #[case(StubFailure::Connection, ErrorCode::ServiceUnavailable)]
    #[case(StubFailure::Query, ErrorCode::InternalError)]
    #[tokio::test]
    async fn authenticate_maps_find_errors(
        #[case] failure: StubFailure,
        #[case] expected_code: ErrorCode,
    ) {
        let repository = Arc::new(StubUserRepository::default());
        repository.set_find_failure(failure);
        let service = DieselLoginService::from_repository(repository);

        let err = service
            .authenticate(&credentials("ada", "secret"))
            .await
            .expect_err("find failures should surface as domain errors");

        assert_eq!(err.code(), expected_code);
    }

    #[rstest]
    #[case(StubFailure::Connection, ErrorCode::ServiceUnavailable)]
    #[case(StubFailure::Query, ErrorCode::InternalError)]
    #[tokio::test]
    async fn register_maps_create_errors(
        #[case] failure: StubFailure,
        #[case] expected_code: ErrorCode,
    ) {
        let repository = Arc::new(StubUserRepository::default());
        repository.set_create_failure(failure);
        let service = DieselLoginService::from_repository(repository);

        let err = service
            .register(&credentials("ada", "secret"))
            .await
            .expect_err("create failures should surface as domain errors");

        assert_eq!(err.code(), expected_code);
    }
}
