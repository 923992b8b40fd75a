//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — API error response payload and stable code.
//! - `User` / `UserId` / `Username` — registered account identity.
//! - `Product` / `NewProduct` — catalog entries.
//! - `Cart` / `LineItem` / `Quantity` — per-user pending purchase items.
//! - `Order` / `NewOrder` / `OrderStatus` — immutable purchase snapshots.
//! - `ports` — async traits abstracting the persistence layer.

pub mod auth;
pub mod cart;
pub mod error;
pub mod order;
pub mod ports;
pub mod product;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, PasswordDigest, UserCredential};
pub use self::cart::{Cart, CartValidationError, LineItem, Quantity};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::order::{NewOrder, Order, OrderStatus, ParseOrderStatusError};
pub use self::product::{NewProduct, Product, ProductValidationError};
pub use self::user::{User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
