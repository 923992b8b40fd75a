//! Order data model.
//!
//! An order is an immutable snapshot of a completed purchase intent. It keeps
//! no referential link back to the cart it originated from.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::LineItem;
use crate::domain::user::UserId;

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Stable string form used for storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOrderStatusError(String);

impl fmt::Display for ParseOrderStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.0)
    }
}

impl std::error::Error for ParseOrderStatusError {}

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            other => Err(ParseOrderStatusError(other.to_owned())),
        }
    }
}

/// Immutable snapshot of a completed purchase intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: UserId,
    /// Snapshot of the purchased line items; trusted as submitted.
    pub products: Vec<LineItem>,
    /// Total amount as submitted by the client; never recomputed.
    #[schema(value_type = f64, example = 59.98)]
    pub amount: Decimal,
    /// Free-form structured shipping data.
    #[schema(value_type = Object)]
    pub address: serde_json::Value,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an order record.
///
/// The user id always comes from the authenticated request context, never
/// from the submitted payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    user_id: UserId,
    products: Vec<LineItem>,
    amount: Decimal,
    address: serde_json::Value,
}

impl NewOrder {
    /// Assemble a new order snapshot from its required parts.
    pub fn new(
        user_id: UserId,
        products: Vec<LineItem>,
        amount: Decimal,
        address: serde_json::Value,
    ) -> Self {
        Self {
            user_id,
            products,
            amount,
            address,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn products(&self) -> &[LineItem] {
        &self.products
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn address(&self) -> &serde_json::Value {
        &self.address
    }
}
