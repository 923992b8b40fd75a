//! Shopping cart aggregate.
//!
//! One cart exists per user. Line items are an ordered sequence with at most
//! one entry per product; adding a product already in the cart merges by
//! incrementing its quantity rather than appending a duplicate.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::UserId;

/// Validation errors raised by cart value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartValidationError {
    /// Quantities must be strictly positive.
    ZeroQuantity,
}

impl fmt::Display for CartValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroQuantity => write!(f, "quantity must be a positive integer"),
        }
    }
}

impl std::error::Error for CartValidationError {}

/// Strictly positive purchase quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "u32", into = "u32")]
#[schema(value_type = u32)]
pub struct Quantity(u32);

impl Quantity {
    /// Validate and construct a [`Quantity`].
    pub fn new(value: u32) -> Result<Self, CartValidationError> {
        if value == 0 {
            return Err(CartValidationError::ZeroQuantity);
        }
        Ok(Self(value))
    }

    /// Underlying count.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Merge another quantity into this one, saturating at `u32::MAX`.
    pub fn merge(self, other: Quantity) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CartValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A `{productId, quantity}` pair carried by carts and order snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog id of the referenced product.
    #[schema(example = 1)]
    pub product_id: i32,
    pub quantity: Quantity,
}

impl LineItem {
    /// Construct a line item from validated parts.
    pub fn new(product_id: i32, quantity: Quantity) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Per-user mutable collection of pending purchase line items.
///
/// ## Invariants
/// - At most one line item per distinct product id.
/// - Line items preserve their insertion order.
///
/// Carts are rebuilt from stored data through [`Cart::from_parts`], which
/// re-establishes the uniqueness invariant.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    user_id: UserId,
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart for a user.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
        }
    }

    /// Rebuild a cart from persisted parts.
    ///
    /// Duplicate product ids in `items` are merged so the uniqueness
    /// invariant holds even for records written by older code.
    pub fn from_parts(user_id: UserId, items: Vec<LineItem>) -> Self {
        let mut cart = Self::empty(user_id);
        for item in items {
            cart.add_item(item.product_id, item.quantity);
        }
        cart
    }

    /// Owner of the cart.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Add a product to the cart.
    ///
    /// When the product is already present its quantity is incremented by the
    /// supplied amount; otherwise a new line item is appended. There is no cap
    /// check against stock.
    pub fn add_item(&mut self, product_id: i32, quantity: Quantity) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            existing.quantity = existing.quantity.merge(quantity);
        } else {
            self.items.push(LineItem::new(product_id, quantity));
        }
    }
}
