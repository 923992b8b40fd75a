//! PostgreSQL-backed `OrderRepository` implementation using Diesel ORM.
//!
//! Orders are append-only snapshots; line items are stored in a `jsonb`
//! array exactly as submitted. Reads return rows in store order without an
//! explicit sort.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{OrderPersistenceError, OrderRepository};
use crate::domain::{LineItem, NewOrder, Order, OrderStatus, UserId};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{NewOrderRow, OrderRow};
use super::pool::DbPool;
use super::schema::orders;

/// Diesel-backed implementation of the `OrderRepository` port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_order(row: OrderRow) -> Result<Order, OrderPersistenceError> {
    let products: Vec<LineItem> = serde_json::from_value(row.products).map_err(|err| {
        OrderPersistenceError::query(format!("stored order products are malformed: {err}"))
    })?;
    let status: OrderStatus = row
        .status
        .parse()
        .map_err(|err| OrderPersistenceError::query(format!("stored order is malformed: {err}")))?;

    Ok(Order {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        products,
        amount: row.amount,
        address: row.address,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<Order, OrderPersistenceError> {
        let products = serde_json::to_value(order.products()).map_err(|err| {
            OrderPersistenceError::query(format!("order products failed to serialise: {err}"))
        })?;

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| OrderPersistenceError::connection(pool_error_message(err)))?;

        let row = diesel::insert_into(orders::table)
            .values(&NewOrderRow {
                id: Uuid::new_v4(),
                user_id: *order.user_id().as_uuid(),
                products: &products,
                amount: order.amount(),
                address: order.address(),
                status: OrderStatus::default().as_str(),
            })
            .returning(OrderRow::as_returning())
            .get_result::<OrderRow>(&mut conn)
            .await
            .map_err(|err| {
                OrderPersistenceError::query(diesel_error_message(&err, "create order"))
            })?;

        row_to_order(row)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| OrderPersistenceError::connection(pool_error_message(err)))?;

        let rows = orders::table
            .filter(orders::user_id.eq(user_id.as_uuid()))
            .select(OrderRow::as_select())
            .load::<OrderRow>(&mut conn)
            .await
            .map_err(|err| {
                OrderPersistenceError::query(diesel_error_message(&err, "find orders by user"))
            })?;

        rows.into_iter().map(row_to_order).collect()
    }
}
