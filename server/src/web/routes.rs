// server/src/web/routes.rs

use actix_web::{error, web, HttpRequest, HttpResponse};
use storefront::ShopError;

use crate::errors::AppError;
use crate::web::handlers::{cart_handlers, category_handlers, product_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Extractor failures (bad JSON, non-numeric ids, malformed queries) become 400 `{error}`.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Rejected(ShopError::validation(err.to_string())).into()
}

fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Rejected(ShopError::validation(err.to_string())).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Rejected(ShopError::validation(err.to_string())).into()
}

/// Mounts every storefront route under `/api`.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .service(
      web::scope("/api")
        .route("/health", web::get().to(health_check_handler))
        // Cart Routes
        .service(
          web::scope("/carts")
            .route("/{user_id}", web::post().to(cart_handlers::create_cart_handler))
            .route("/{cart_id}", web::get().to(cart_handlers::get_cart_handler))
            .route("/{cart_id}/items", web::post().to(cart_handlers::add_item_handler))
            .route("/{cart_id}/items", web::get().to(cart_handlers::list_items_handler))
            .route(
              "/{cart_id}/items/{item_id}",
              web::put().to(cart_handlers::update_item_handler),
            )
            .route(
              "/{cart_id}/items/{item_id}",
              web::delete().to(cart_handlers::remove_item_handler),
            ),
        )
        // Product Routes; the fixed segments must be registered before `/{product_id}`.
        .service(
          web::scope("/products")
            .route("", web::get().to(product_handlers::list_products_handler))
            .route("", web::post().to(product_handlers::create_product_handler))
            .route(
              "/categories",
              web::get().to(product_handlers::products_by_categories_handler),
            )
            .route(
              "/category/{category_id}",
              web::get().to(product_handlers::products_by_category_handler),
            )
            .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
            .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
            .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
        )
        // Category Routes
        .service(
          web::scope("/categories")
            .route("", web::get().to(category_handlers::list_categories_handler))
            .route("", web::post().to(category_handlers::create_category_handler))
            .route("/{category_id}", web::get().to(category_handlers::get_category_handler)),
        ),
    );
}
