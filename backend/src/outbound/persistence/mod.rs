//! PostgreSQL adapters for the domain's persistence ports.
//!
//! One `Diesel*` type per port, all sharing a [`DbPool`] of `diesel-async`
//! connections. The adapters translate between row structs and domain types
//! and nothing more; merge rules and validation live in the domain. Row
//! structs (`models`) and table definitions (`schema`) never leak out of this
//! module, and every Diesel failure is mapped onto the owning port's error
//! type before it crosses the boundary.
//!
//! Carts and order snapshots keep the document shape of the data they store:
//! the line-item sequence lives in a single `jsonb` column rather than a join
//! table, so a cart read or write is always one row.
//!
//! ```ignore
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/shop")).await?;
//! let carts = DieselCartRepository::new(pool.clone());
//! ```

pub(crate) mod diesel_helpers;
mod diesel_cart_repository;
mod diesel_login_service;
mod diesel_order_repository;
mod diesel_product_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_cart_repository::DieselCartRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
