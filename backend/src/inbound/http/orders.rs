//! Order API handlers.
//!
//! ```text
//! POST /api/orders              {"products":[...],"amount":59.98,"address":{...}}
//! GET  /api/orders/user/{userId}
//! ```
//!
//! Orders are immutable snapshots. The submitted `products` and `amount` are
//! trusted verbatim; stock is neither checked nor decremented.

use actix_web::{HttpResponse, get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::ports::OrderPersistenceError;
use crate::domain::{Error, LineItem, NewOrder, Order, Quantity, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// A submitted `{productId, quantity}` pair.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItemBody {
    #[schema(example = 1)]
    pub product_id: Option<i32>,
    #[schema(example = 2)]
    pub quantity: Option<u32>,
}

/// Request payload for creating an order.
///
/// `products`, `amount` and `address` are all required. Any `userId` in the
/// payload is ignored; the authenticated session supplies the identity.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub products: Option<Vec<OrderLineItemBody>>,
    #[schema(value_type = Option<f64>, example = 59.98)]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<Object>)]
    pub address: Option<serde_json::Value>,
}

fn parse_line_items(items: Vec<OrderLineItemBody>) -> Result<Vec<LineItem>, Error> {
    let mut parsed = Vec::with_capacity(items.len());
    for item in items {
        let (Some(product_id), Some(quantity)) = (item.product_id, item.quantity) else {
            return Err(Error::invalid_request(
                "each product requires productId and quantity",
            ));
        };
        let quantity =
            Quantity::new(quantity).map_err(|err| Error::invalid_request(err.to_string()))?;
        parsed.push(LineItem::new(product_id, quantity));
    }
    Ok(parsed)
}

fn map_list_error(err: OrderPersistenceError) -> Error {
    match err {
        OrderPersistenceError::Connection { message } => Error::service_unavailable(message),
        OrderPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Create a new order.
///
/// The whole payload is stored as-is: no price recomputation and no stock
/// decrement. Persistence failures are reported as a generic bad request,
/// matching the all-or-nothing contract of the endpoint.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Bad request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateOrderRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user()?;

    let CreateOrderRequest {
        products,
        amount,
        address,
    } = payload.into_inner();
    let (Some(products), Some(amount), Some(address)) = (products, amount, address) else {
        return Err(Error::invalid_request(
            "products, amount and address are required",
        ));
    };
    let products = parse_line_items(products)?;

    let order = NewOrder::new(user_id, products, amount, address);
    let created = state.orders.create(&order).await.map_err(|err| {
        error!(error = %err, "order creation failed");
        Error::invalid_request("Bad request")
    })?;

    Ok(HttpResponse::Created().json(created))
}

/// List all orders placed by a user.
#[utoipa::path(
    get,
    path = "/api/orders/user/{userId}",
    params(("userId" = String, Path, description = "The user id")),
    responses(
        (status = 200, description = "The user's orders", body = [Order]),
        (status = 400, description = "Invalid user id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No orders for this user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["orders"],
    operation_id = "listUserOrders"
)]
#[get("/orders/user/{user_id}")]
pub async fn list_user_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Order>>> {
    session.require_user()?;

    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    let orders = state
        .orders
        .find_by_user(&user_id)
        .await
        .map_err(map_list_error)?;
    if orders.is_empty() {
        return Err(Error::not_found("Orders not found"));
    }

    Ok(web::Json(orders))
}
