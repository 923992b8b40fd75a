//! PostgreSQL-backed `ProductRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductPersistenceError, ProductRepository};
use crate::domain::{NewProduct, Product};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{NewProductRow, ProductRow, ProductUpdate};
use super::pool::DbPool;
use super::schema::products;

/// Diesel-backed implementation of the `ProductRepository` port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_product(row: ProductRow) -> Product {
    Product {
        id: row.id,
        name: row.name,
        description: row.description,
        price: row.price,
        category: row.category,
        image_url: row.image_url,
        count_in_stock: row.count_in_stock,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn connection_error(err: super::pool::PoolError) -> ProductPersistenceError {
    ProductPersistenceError::connection(pool_error_message(err))
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;

        let rows = products::table
            .select(ProductRow::as_select())
            .load::<ProductRow>(&mut conn)
            .await
            .map_err(|err| {
                ProductPersistenceError::query(diesel_error_message(&err, "list products"))
            })?;

        Ok(rows.into_iter().map(row_to_product).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;

        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                ProductPersistenceError::query(diesel_error_message(&err, "find product"))
            })?;

        Ok(row.map(row_to_product))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, ProductPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(connection_error)?;

        let rows = products::table
            .filter(products::id.eq_any(ids))
            .select(ProductRow::as_select())
            .load::<ProductRow>(&mut conn)
            .await
            .map_err(|err| {
                ProductPersistenceError::query(diesel_error_message(&err, "find products by ids"))
            })?;

        Ok(rows.into_iter().map(row_to_product).collect())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;

        let row = diesel::insert_into(products::table)
            .values(&NewProductRow {
                name: product.name(),
                description: product.description(),
                price: product.price(),
                category: product.category(),
                image_url: product.image_url(),
                count_in_stock: product.count_in_stock(),
            })
            .returning(ProductRow::as_returning())
            .get_result::<ProductRow>(&mut conn)
            .await
            .map_err(|err| {
                ProductPersistenceError::query(diesel_error_message(&err, "create product"))
            })?;

        Ok(row_to_product(row))
    }

    async fn update(
        &self,
        id: i32,
        product: &NewProduct,
    ) -> Result<Option<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;

        let row = diesel::update(products::table.find(id))
            .set(&ProductUpdate {
                name: product.name(),
                description: product.description(),
                price: product.price(),
                category: product.category(),
                image_url: product.image_url(),
                count_in_stock: product.count_in_stock(),
                updated_at: Utc::now(),
            })
            .returning(ProductRow::as_returning())
            .get_result::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                ProductPersistenceError::query(diesel_error_message(&err, "update product"))
            })?;

        Ok(row.map(row_to_product))
    }

    async fn delete(&self, id: i32) -> Result<bool, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;

        let deleted = diesel::delete(products::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|err| {
                ProductPersistenceError::query(diesel_error_message(&err, "delete product"))
            })?;

        Ok(deleted > 0)
    }
}
