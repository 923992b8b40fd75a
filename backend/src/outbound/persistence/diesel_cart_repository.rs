//! PostgreSQL-backed `CartRepository` implementation using Diesel ORM.
//!
//! Carts are stored as one row per user with the ordered line items in a
//! `jsonb` array, preserving the document-per-user record shape. Saves are
//! plain upserts; there is no optimistic locking, so concurrent adds for the
//! same user follow last-write-wins semantics.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CartPersistenceError, CartRepository};
use crate::domain::{Cart, LineItem, UserId};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{CartRow, NewCartRow};
use super::pool::DbPool;
use super::schema::carts;

/// Diesel-backed implementation of the `CartRepository` port.
#[derive(Clone)]
pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_cart(row: CartRow) -> Result<Cart, CartPersistenceError> {
    let items: Vec<LineItem> = serde_json::from_value(row.items).map_err(|err| {
        CartPersistenceError::query(format!("stored cart items are malformed: {err}"))
    })?;
    Ok(Cart::from_parts(UserId::from_uuid(row.user_id), items))
}

fn items_to_json(cart: &Cart) -> Result<serde_json::Value, CartPersistenceError> {
    serde_json::to_value(cart.items())
        .map_err(|err| CartPersistenceError::query(format!("cart items failed to serialise: {err}")))
}

#[async_trait]
impl CartRepository for DieselCartRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Cart>, CartPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CartPersistenceError::connection(pool_error_message(err)))?;

        let row = carts::table
            .filter(carts::user_id.eq(user_id.as_uuid()))
            .select(CartRow::as_select())
            .first::<CartRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                CartPersistenceError::query(diesel_error_message(&err, "find cart by user"))
            })?;

        row.map(row_to_cart).transpose()
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartPersistenceError> {
        let items = items_to_json(cart)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CartPersistenceError::connection(pool_error_message(err)))?;

        diesel::insert_into(carts::table)
            .values(&NewCartRow {
                user_id: *cart.user_id().as_uuid(),
                items: &items,
            })
            .on_conflict(carts::user_id)
            .do_update()
            .set((
                carts::items.eq(&items),
                carts::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(|err| CartPersistenceError::query(diesel_error_message(&err, "save cart")))?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, CartPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CartPersistenceError::connection(pool_error_message(err)))?;

        let deleted = diesel::delete(carts::table.filter(carts::user_id.eq(user_id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| {
                CartPersistenceError::query(diesel_error_message(&err, "delete cart"))
            })?;

        Ok(deleted > 0)
    }
}
