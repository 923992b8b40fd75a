//! Product catalog API handlers.
//!
//! ```text
//! GET    /api/products
//! GET    /api/products/{id}
//! POST   /api/products
//! PUT    /api/products/{id}
//! DELETE /api/products/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ports::ProductPersistenceError;
use crate::domain::{Error, NewProduct, Product, ProductValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request payload for creating or replacing a product.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>, example = 29.99)]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    /// Defaults to zero when absent.
    pub count_in_stock: Option<i32>,
}

/// Confirmation body returned after deleting a product.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProductDeletedResponse {
    pub message: String,
}

fn map_product_error(err: ProductPersistenceError) -> Error {
    match err {
        ProductPersistenceError::Connection { message } => Error::service_unavailable(message),
        ProductPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_validation_error(err: ProductValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

fn parse_product_request(body: ProductRequest) -> Result<NewProduct, Error> {
    let ProductRequest {
        name,
        description,
        price,
        category,
        image_url,
        count_in_stock,
    } = body;

    let (Some(name), Some(description), Some(price), Some(category), Some(image_url)) =
        (name, description, price, category, image_url)
    else {
        return Err(Error::invalid_request(
            "name, description, price, category and imageUrl are required",
        ));
    };

    NewProduct::try_new(
        name,
        description,
        price,
        category,
        image_url,
        count_in_stock,
    )
    .map_err(map_validation_error)
}

/// List the product catalog.
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Products", body = [Product]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts",
    security([])
)]
#[get("/products")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Product>>> {
    let products = state.products.list().await.map_err(map_product_error)?;
    Ok(web::Json(products))
}

/// Fetch a single product by id.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Numeric product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProduct",
    security([])
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Product>> {
    let id = path.into_inner();
    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(map_product_error)?
        .ok_or_else(|| Error::not_found("Product not found"))?;
    Ok(web::Json(product))
}

/// Create a catalog entry.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct",
    security([])
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<ProductRequest>,
) -> ApiResult<HttpResponse> {
    let input = parse_product_request(payload.into_inner())?;
    let product = state
        .products
        .create(&input)
        .await
        .map_err(map_product_error)?;
    Ok(HttpResponse::Created().json(product))
}

/// Replace a catalog entry.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Numeric product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Product not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "updateProduct",
    security([])
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<ProductRequest>,
) -> ApiResult<web::Json<Product>> {
    let id = path.into_inner();
    let input = parse_product_request(payload.into_inner())?;
    let product = state
        .products
        .update(id, &input)
        .await
        .map_err(map_product_error)?
        .ok_or_else(|| Error::not_found("Product not found"))?;
    Ok(web::Json(product))
}

/// Delete a catalog entry.
///
/// Cart and order entries referencing the id are untouched; there is no
/// cascading delete.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Numeric product id")),
    responses(
        (status = 200, description = "Product deleted", body = ProductDeletedResponse),
        (status = 404, description = "Product not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "deleteProduct",
    security([])
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ProductDeletedResponse>> {
    let id = path.into_inner();
    let deleted = state
        .products
        .delete(id)
        .await
        .map_err(map_product_error)?;
    if !deleted {
        return Err(Error::not_found("Product not found"));
    }
    Ok(web::Json(ProductDeletedResponse {
        message: "Product deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureCartRepository, FixtureLoginService, FixtureOrderRepository, ProductRepository,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    /// In-memory catalog assigning sequential ids, mirroring a serial column.
    #[derive(Default)]
    struct StubProductRepository {
        products: Mutex<Vec<Product>>,
    }

    #[async_trait]
    impl ProductRepository for StubProductRepository {
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

        async fn find_by_ids(
            &self,
            ids: &[i32],
        ) -> Result<Vec<Product>, ProductPersistenceError> {
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

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(
            Arc::new(FixtureLoginService),
            Arc::new(StubProductRepository::default()),
            Arc::new(FixtureCartRepository),
            Arc::new(FixtureOrderRepository),
        );
        App::new()
            .app_data(web::Data::new(state))
            .service(
                web::scope("/api")
                    .service(list_products)
                    .service(get_product)
                    .service(create_product)
                    .service(update_product)
                    .service(delete_product),
            )
    }

    fn mug_payload() -> Value {
        json!({
            "name": "Enamel mug",
            "description": "A camping mug",
            "price": 12.5,
            "category": "kitchen",
            "imageUrl": "https://example.test/mug.png",
            "countInStock": 4
        })
    }

    #[actix_web::test]
    async fn create_then_get_round_trips_the_product() {
        let app = actix_test::init_service(test_app()).await;

        let create = actix_test::TestRequest::post()
            .uri("/api/products")
            .set_json(mug_payload())
            .to_request();
        let created = actix_test::call_service(&app, create).await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let created_body: Value = actix_test::read_body_json(created).await;
        let id = created_body
            .get("id")
            .and_then(Value::as_i64)
            .expect("created id");

        let get = actix_test::TestRequest::get()
            .uri(&format!("/api/products/{id}"))
            .to_request();
        let fetched = actix_test::call_service(&app, get).await;
        assert_eq!(fetched.status(), StatusCode::OK);
        let fetched_body: Value = actix_test::read_body_json(fetched).await;
        assert_eq!(
            fetched_body.get("name").and_then(Value::as_str),
            Some("Enamel mug")
        );
        assert_eq!(fetched_body.get("price"), Some(&json!(12.5)));
        assert_eq!(fetched_body.get("countInStock"), Some(&json!(4)));
    }

    #[actix_web::test]
    async fn create_rejects_missing_required_fields() {
        let app = actix_test::init_service(test_app()).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({ "name": "Enamel mug" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
    }

    #[actix_web::test]
    async fn get_unknown_product_is_not_found() {
        let app = actix_test::init_service(test_app()).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/products/999")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_replaces_the_stored_record() {
        let app = actix_test::init_service(test_app()).await;

        let create = actix_test::TestRequest::post()
            .uri("/api/products")
            .set_json(mug_payload())
            .to_request();
        let created: Value =
            actix_test::read_body_json(actix_test::call_service(&app, create).await).await;
        let id = created.get("id").and_then(Value::as_i64).expect("id");

        let mut replacement = mug_payload();
        replacement["name"] = json!("Steel mug");
        let update = actix_test::TestRequest::put()
            .uri(&format!("/api/products/{id}"))
            .set_json(replacement)
            .to_request();
        let updated = actix_test::call_service(&app, update).await;
        assert_eq!(updated.status(), StatusCode::OK);
        let updated_body: Value = actix_test::read_body_json(updated).await;
        assert_eq!(
            updated_body.get("name").and_then(Value::as_str),
            Some("Steel mug")
        );
    }

    #[actix_web::test]
    async fn delete_removes_the_record_and_then_404s() {
        let app = actix_test::init_service(test_app()).await;

        let create = actix_test::TestRequest::post()
            .uri("/api/products")
            .set_json(mug_payload())
            .to_request();
        let created: Value =
            actix_test::read_body_json(actix_test::call_service(&app, create).await).await;
        let id = created.get("id").and_then(Value::as_i64).expect("id");

        let delete_req = actix_test::TestRequest::delete()
            .uri(&format!("/api/products/{id}"))
            .to_request();
        let deleted = actix_test::call_service(&app, delete_req).await;
        assert_eq!(deleted.status(), StatusCode::OK);

        let again = actix_test::TestRequest::delete()
            .uri(&format!("/api/products/{id}"))
            .to_request();
        let response = actix_test::call_service(&app, again).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
