//! Shopping cart API handlers.
//!
//! ```text
//! GET    /api/cart
//! POST   /api/cart   {"productId":1,"quantity":2}
//! DELETE /api/cart
//! ```
//!
//! All cart routes act on the authenticated user's single cart record. Adding
//! a product that is already in the cart merges by incrementing its quantity.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{CartPersistenceError, ProductPersistenceError};
use crate::domain::{Cart, Error, Product, Quantity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for adding a product to the cart.
///
/// Both fields are required; requests missing either are rejected without
/// touching the stored cart.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    #[schema(example = 1)]
    pub product_id: Option<i32>,
    #[schema(example = 2)]
    pub quantity: Option<u32>,
}

/// Updated cart returned after an add.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    pub message: String,
    pub cart: Cart,
}

/// A cart line item with its referenced product resolved.
///
/// `product` is `null` when the catalog entry has since been deleted; the
/// line item itself is preserved because nothing cascades into carts.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    #[schema(example = 1)]
    pub product_id: i32,
    #[schema(value_type = u32, minimum = 1)]
    pub quantity: Quantity,
    pub product: Option<Product>,
}

/// The authenticated user's cart with product details resolved.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    pub items: Vec<CartItemView>,
}

/// Confirmation body returned after clearing the cart.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CartClearedResponse {
    pub message: String,
}

fn map_cart_error(err: CartPersistenceError) -> Error {
    match err {
        CartPersistenceError::Connection { message } => Error::service_unavailable(message),
        CartPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_product_error(err: ProductPersistenceError) -> Error {
    match err {
        ProductPersistenceError::Connection { message } => Error::service_unavailable(message),
        ProductPersistenceError::Query { message } => Error::internal(message),
    }
}

fn resolve_cart_view(cart: &Cart, products: Vec<Product>) -> CartView {
    let items = cart
        .items()
        .iter()
        .map(|item| {
            let product = products.iter().find(|p| p.id == item.product_id).cloned();
            CartItemView {
                product_id: item.product_id,
                quantity: item.quantity,
                product,
            }
        })
        .collect();

    CartView {
        user_id: cart.user_id().to_string(),
        items,
    }
}

/// Fetch the authenticated user's cart with product details resolved.
#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "The user's cart", body = CartView),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Cart not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cart"],
    operation_id = "getCart"
)]
#[get("/cart")]
pub async fn get_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CartView>> {
    let user_id = session.require_user()?;

    let cart = state
        .carts
        .find_by_user(&user_id)
        .await
        .map_err(map_cart_error)?
        .ok_or_else(|| Error::not_found("Cart not found"))?;

    let ids: Vec<i32> = cart.items().iter().map(|item| item.product_id).collect();
    let products = state
        .products
        .find_by_ids(&ids)
        .await
        .map_err(map_product_error)?;

    Ok(web::Json(resolve_cart_view(&cart, products)))
}

/// Add a product to the authenticated user's cart.
///
/// Creates the cart lazily on first add. When the product is already present
/// its quantity is incremented by the supplied amount; there is no cap check
/// against stock.
#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Product added to cart", body = AddToCartResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cart"],
    operation_id = "addToCart"
)]
#[post("/cart")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddToCartRequest>,
) -> ApiResult<web::Json<AddToCartResponse>> {
    let user_id = session.require_user()?;

    let AddToCartRequest {
        product_id,
        quantity,
    } = payload.into_inner();
    let (Some(product_id), Some(quantity)) = (product_id, quantity) else {
        return Err(Error::invalid_request(
            "productId and quantity are required",
        ));
    };
    let quantity = Quantity::new(quantity).map_err(|err| Error::invalid_request(err.to_string()))?;

    let mut cart = state
        .carts
        .find_by_user(&user_id)
        .await
        .map_err(map_cart_error)?
        .unwrap_or_else(|| Cart::empty(user_id));

    cart.add_item(product_id, quantity);
    state.carts.save(&cart).await.map_err(map_cart_error)?;

    Ok(web::Json(AddToCartResponse {
        message: "Product added to cart successfully".to_owned(),
        cart,
    }))
}

/// Delete the authenticated user's cart record entirely.
#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart cleared", body = CartClearedResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Cart not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cart"],
    operation_id = "clearCart"
)]
#[delete("/cart")]
pub async fn clear_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CartClearedResponse>> {
    let user_id = session.require_user()?;

    let deleted = state
        .carts
        .delete_by_user(&user_id)
        .await
        .map_err(map_cart_error)?;
    if !deleted {
        return Err(Error::not_found("Cart not found"));
    }

    Ok(web::Json(CartClearedResponse {
        message: "Cart cleared successfully".to_owned(),
    }))
}
