//! Port abstraction for product catalog persistence adapters and their errors.
use async_trait::async_trait;
use chrono::Utc;

use crate::domain::product::{NewProduct, Product};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by product repository adapters.
    pub enum ProductPersistenceError {
        /// Repository connection could not be established.
        Connection => "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "product repository query failed: {message}",
    }
}

/// Port for the product catalog store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List the whole catalog in store order.
    async fn list(&self) -> Result<Vec<Product>, ProductPersistenceError>;

    /// Fetch a single product by its numeric id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ProductPersistenceError>;

    /// Fetch the products matching any of the given ids.
    ///
    /// Ids without a matching record are silently absent from the result;
    /// carts and orders may reference products that have since been deleted.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, ProductPersistenceError>;

    /// Insert a new catalog entry and return the stored record.
    async fn create(&self, product: &NewProduct) -> Result<Product, ProductPersistenceError>;

    /// Replace an existing catalog entry. Returns `None` when the id is
    /// unknown.
    async fn update(
        &self,
        id: i32,
        product: &NewProduct,
    ) -> Result<Option<Product>, ProductPersistenceError>;

    /// Delete a catalog entry. Returns whether a record existed.
    async fn delete(&self, id: i32) -> Result<bool, ProductPersistenceError>;
}

/// Fixture implementation for tests that do not exercise the catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductRepository;

fn echo_product(id: i32, product: &NewProduct) -> Product {
    let now = Utc::now();
    Product {
        id,
        name: product.name().to_owned(),
        description: product.description().to_owned(),
        price: product.price(),
        category: product.category().to_owned(),
        image_url: product.image_url().to_owned(),
        count_in_stock: product.count_in_stock(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl ProductRepository for FixtureProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ProductPersistenceError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Product>, ProductPersistenceError> {
        Ok(None)
    }

    async fn find_by_ids(&self, _ids: &[i32]) -> Result<Vec<Product>, ProductPersistenceError> {
        Ok(Vec::new())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, ProductPersistenceError> {
        Ok(echo_product(1, product))
    }

    async fn update(
        &self,
        _id: i32,
        _product: &NewProduct,
    ) -> Result<Option<Product>, ProductPersistenceError> {
        Ok(None)
    }

    async fn delete(&self, _id: i32) -> Result<bool, ProductPersistenceError> {
        Ok(false)
    }
}
