//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordDigest, User, UserCredential, UserId, Username};

use super::diesel_helpers::{diesel_error_message, is_unique_violation, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_credential(row: UserRow) -> Result<UserCredential, UserPersistenceError> {
    let username = Username::new(row.username)
        .map_err(|err| UserPersistenceError::query(format!("stored username invalid: {err}")))?;
    let user = User::new(UserId::from_uuid(row.id), username);
    Ok(UserCredential::new(
        user,
        PasswordDigest::from_hex(row.password_hash),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, credential: &UserCredential) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(pool_error_message(err)))?;

        diesel::insert_into(users::table)
            .values(&NewUserRow {
                id: *credential.user().id().as_uuid(),
                username: credential.user().username().as_ref(),
                password_hash: credential.digest().as_ref(),
            })
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_username(
                        credential.user().username().as_ref(),
                    )
                } else {
                    UserPersistenceError::query(diesel_error_message(&err, "create user"))
                }
            })?;

        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredential>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(pool_error_message(err)))?;

        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                UserPersistenceError::query(diesel_error_message(&err, "find user by username"))
            })?;

        row.map(row_to_credential).transpose()
    }
}
