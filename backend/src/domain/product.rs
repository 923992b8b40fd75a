//! Product catalog data model.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by [`NewProduct::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    EmptyDescription,
    EmptyCategory,
    EmptyImageUrl,
    NegativePrice,
    NegativeStock,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::EmptyImageUrl => write!(f, "imageUrl must not be empty"),
            Self::NegativePrice => write!(f, "price must not be negative"),
            Self::NegativeStock => write!(f, "countInStock must not be negative"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Catalog entry.
///
/// Owned by the catalog alone; carts and orders reference products by id and
/// deleting a product never cascades into them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Numeric catalog identifier.
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Unit price in the shop currency.
    #[schema(value_type = f64, example = 29.99)]
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    /// Units currently in stock.
    #[schema(example = 12)]
    pub count_in_stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or replacing a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    description: String,
    price: Decimal,
    category: String,
    image_url: String,
    count_in_stock: i32,
}

impl NewProduct {
    /// Validate and construct a catalog input.
    ///
    /// `count_in_stock` defaults to zero when absent.
    pub fn try_new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
        image_url: impl Into<String>,
        count_in_stock: Option<i32>,
    ) -> Result<Self, ProductValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ProductValidationError::EmptyDescription);
        }
        if price < Decimal::ZERO {
            return Err(ProductValidationError::NegativePrice);
        }
        let category = category.into();
        if category.trim().is_empty() {
            return Err(ProductValidationError::EmptyCategory);
        }
        let image_url = image_url.into();
        if image_url.trim().is_empty() {
            return Err(ProductValidationError::EmptyImageUrl);
        }
        let count_in_stock = count_in_stock.unwrap_or(0);
        if count_in_stock < 0 {
            return Err(ProductValidationError::NegativeStock);
        }

        Ok(Self {
            name,
            description,
            price,
            category,
            image_url,
            count_in_stock,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    pub fn image_url(&self) -> &str {
        self.image_url.as_str()
    }

    pub fn count_in_stock(&self) -> i32 {
        self.count_in_stock
    }
}
