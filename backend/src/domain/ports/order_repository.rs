//! Port abstraction for order persistence adapters and their errors.
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by order repository adapters.
    pub enum OrderPersistenceError {
        /// Repository connection could not be established.
        Connection => "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "order repository query failed: {message}",
    }
}

/// Port for the append-only order store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order snapshot and return the stored record.
    async fn create(&self, order: &NewOrder) -> Result<Order, OrderPersistenceError>;

    /// All orders placed by a user, in store order.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderPersistenceError>;
}

/// Fixture implementation for tests that do not exercise order persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderRepository;

#[async_trait]
impl OrderRepository for FixtureOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<Order, OrderPersistenceError> {
        let now = Utc::now();
        Ok(Order {
            id: Uuid::new_v4(),
            user_id: order.user_id().clone(),
            products: order.products().to_vec(),
            amount: order.amount(),
            address: order.address().clone(),
            status: OrderStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_user(&self, _user_id: &UserId) -> Result<Vec<Order>, OrderPersistenceError> {
        Ok(Vec::new())
    }
}
