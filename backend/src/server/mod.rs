//! HTTP server assembly: routes, session middleware, and port wiring.

mod config;

pub use config::{ServerConfig, SessionSettings};

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::auth::{login, register};
use crate::inbound::http::cart::{add_to_cart, clear_cart, get_cart};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::orders::{create_order, list_user_orders};
use crate::inbound::http::products::{
    create_product, delete_product, get_product, list_products, update_product,
};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::persistence::{
    DieselCartRepository, DieselLoginService, DieselOrderRepository, DieselProductRepository,
    DieselUserRepository,
};

/// Session cookie lifetime. Shoppers re-authenticate after two idle hours.
const SESSION_TTL: actix_web::cookie::time::Duration =
    actix_web::cookie::time::Duration::hours(2);

/// Wire the handler state from configuration.
///
/// With a pool every port gets its Diesel adapter; without one the server
/// falls back to fixtures so it can still boot for DB-less development.
fn wire_ports(config: &ServerConfig) -> HttpState {
    config.db_pool.as_ref().map_or_else(
        || {
            warn!("no database pool configured; serving fixture ports");
            HttpState::fixtures()
        },
        |pool| {
            HttpState::new(
                Arc::new(DieselLoginService::new(DieselUserRepository::new(
                    pool.clone(),
                ))),
                Arc::new(DieselProductRepository::new(pool.clone())),
                Arc::new(DieselCartRepository::new(pool.clone())),
                Arc::new(DieselOrderRepository::new(pool.clone())),
            )
        },
    )
}

fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(settings.secure_cookies)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(SESSION_TTL))
        .build()
}

fn shop_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: &SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let api = web::scope("/api")
        .wrap(session_middleware(session))
        .service(register)
        .service(login)
        .service(list_products)
        .service(get_product)
        .service(create_product)
        .service(update_product)
        .service(delete_product)
        .service(get_cart)
        .service(add_to_cart)
        .service(clear_cart)
        .service(create_order)
        .service(list_user_orders);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind and start the HTTP server.
///
/// Marks `health_state` ready once the listener is up so readiness probes
/// flip to 200 only after the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(wire_ports(&config));
    let worker_health = health_state.clone();
    let session = config.session.clone();

    let server = HttpServer::new(move || {
        shop_app(worker_health.clone(), http_state.clone(), &session)
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
