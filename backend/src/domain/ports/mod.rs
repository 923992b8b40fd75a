//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cart_repository;
mod login_service;
mod order_repository;
mod product_repository;
mod user_repository;

#[cfg(test)]
pub use cart_repository::MockCartRepository;
pub use cart_repository::{CartPersistenceError, CartRepository, FixtureCartRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{FixtureOrderRepository, OrderPersistenceError, OrderRepository};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{
    FixtureProductRepository, ProductPersistenceError, ProductRepository,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
