//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, products,
//!   cart, orders, health)
//! - **Schemas**: Domain types and handler payloads referenced by those paths
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Cart, Error, ErrorCode, LineItem, Order, OrderStatus, Product, Quantity, User};
use crate::inbound::http::auth::CredentialsRequest;
use crate::inbound::http::cart::{
    AddToCartRequest, AddToCartResponse, CartClearedResponse, CartItemView, CartView,
};
use crate::inbound::http::orders::{CreateOrderRequest, OrderLineItemBody};
use crate::inbound::http::products::{ProductDeletedResponse, ProductRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "E-commerce API",
        description = "REST interface for the product catalog, per-user shopping carts and order placement.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::cart::get_cart,
        crate::inbound::http::cart::add_to_cart,
        crate::inbound::http::cart::clear_cart,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::list_user_orders,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Product,
        Cart,
        LineItem,
        Quantity,
        Order,
        OrderStatus,
        CredentialsRequest,
        ProductRequest,
        ProductDeletedResponse,
        AddToCartRequest,
        AddToCartResponse,
        CartItemView,
        CartView,
        CartClearedResponse,
        OrderLineItemBody,
        CreateOrderRequest,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "products", description = "Product catalog management"),
        (name = "cart", description = "Shopping cart management"),
        (name = "orders", description = "Order management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
