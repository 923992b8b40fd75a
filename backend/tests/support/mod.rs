//! In-memory port implementations and app assembly for endpoint tests.
//!
//! These adapters satisfy the same contracts as the Diesel-backed ones so the
//! endpoint tests can drive the full HTTP surface without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use backend::domain::ports::{
    CartPersistenceError, CartRepository, LoginService, OrderPersistenceError, OrderRepository,
    ProductPersistenceError, ProductRepository,
};
use backend::domain::{
    Cart, Error, LoginCredentials, NewOrder, NewProduct, Order, OrderStatus, Product, User,
    UserCredential, UserId, Username,
};
use backend::inbound::http::state::HttpState;

/// In-memory login service storing credentials by username.
#[derive(Default)]
pub struct InMemoryLoginService {
    accounts: Mutex<HashMap<String, UserCredential>>,
}

#[async_trait]
impl LoginService for InMemoryLoginService {
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = Username::new(credentials.username())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let mut accounts = self.accounts.lock().expect("accounts lock");
        if accounts.contains_key(username.as_ref()) {
            return Err(Error::conflict("username already registered"));
        }
        let user = User::new(UserId::random(), username);
        accounts.insert(
            user.username().to_string(),
            UserCredential::new(user.clone(), credentials.digest()),
        );
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let accounts = self.accounts.lock().expect("accounts lock");
        match accounts.get(credentials.username()) {
            Some(stored) if stored.digest().matches(credentials.password()) => {
                Ok(stored.user().id().clone())
            }
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}

/// In-memory cart store keyed by user id.
#[derive(Default)]
pub struct InMemoryCartRepository {
    carts: Mutex<HashMap<Uuid, Cart>>,
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, CartPersistenceError> {
        Ok(self
            .carts
            .lock()
            .expect("cart lock")
            .get(user_id.as_uuid())
            .cloned())
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartPersistenceError> {
        self.carts
            .lock()
            .expect("cart lock")
            .insert(*cart.user_id().as_uuid(), cart.clone());
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, CartPersistenceError> {
        Ok(self
            .carts
            .lock()
            .expect("cart lock")
            .remove(user_id.as_uuid())
            .is_some())
    }
}

/// In-memory order store preserving insertion order.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<Order, OrderPersistenceError> {
        let now = Utc::now();
        let stored = Order {
            id: Uuid::new_v4(),
            user_id: order.user_id().clone(),
            products: order.products().to_vec(),
            amount: order.amount(),
            address: order.address().clone(),
            status: OrderStatus::default(),
            created_at: now,
            updated_at: now,
        };
        self.orders.lock().expect("order lock").push(stored.clone());
        Ok(stored)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderPersistenceError> {
        Ok(self
            .orders
            .lock()
            .expect("order lock")
            .iter()
            .filter(|order| order.user_id == *user_id)
            .cloned()
            .collect())
    }
}

/// In-memory catalog assigning sequential ids like a serial column.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ProductPersistenceError> {
        Ok(self.products.lock().expect("catalog lock").clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ProductPersistenceError> {
        Ok(self
            .products
            .lock()
            .expect("catalog lock")
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, ProductPersistenceError> {
        Ok(self
            .products
            .lock()
            .expect("catalog lock")
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, ProductPersistenceError> {
        let mut products = self.products.lock().expect("catalog lock");
        let id = i32::try_from(products.len()).expect("catalog fits in i32") + 1;
        let now = Utc::now();
        let stored = Product {
            id,
            name: product.name().to_owned(),
            description: product.description().to_owned(),
            price: product.price(),
            category: product.category().to_owned(),
            image_url: product.image_url().to_owned(),
            count_in_stock: product.count_in_stock(),
            created_at: now,
            updated_at: now,
        };
        products.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: i32,
        product: &NewProduct,
    ) -> Result<Option<Product>, ProductPersistenceError> {
        let mut products = self.products.lock().expect("catalog lock");
        let Some(existing) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        existing.name = product.name().to_owned();
        existing.description = product.description().to_owned();
        existing.price = product.price();
        existing.category = product.category().to_owned();
        existing.image_url = product.image_url().to_owned();
        existing.count_in_stock = product.count_in_stock();
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ProductPersistenceError> {
        let mut products = self.products.lock().expect("catalog lock");
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

/// Session middleware for tests: fresh key, `Secure` disabled for plain HTTP.
fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Assemble the full API surface over in-memory ports.
pub fn shop_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    use backend::inbound::http::auth::{login, register};
    use backend::inbound::http::cart::{add_to_cart, clear_cart, get_cart};
    use backend::inbound::http::orders::{create_order, list_user_orders};
    use backend::inbound::http::products::{
        create_product, delete_product, get_product, list_products, update_product,
    };

    let state = HttpState::new(
        Arc::new(InMemoryLoginService::default()),
        Arc::new(InMemoryProductRepository::default()),
        Arc::new(InMemoryCartRepository::default()),
        Arc::new(InMemoryOrderRepository::default()),
    );

    App::new()
        .app_data(web::Data::new(state))
        .wrap(session_middleware())
        .service(
            web::scope("/api")
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
                .service(list_user_orders),
        )
}
