// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::{ListOptions, ProductDraft, ProductPatch};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// Raw listing parameters, e.g. `?sort=name,ASC&limit=10&offset=0`.
#[derive(Deserialize, Debug, Default)]
pub struct ListProductsQuery {
  pub sort: Option<String>,
  pub limit: Option<String>,
  pub offset: Option<String>,
}

impl ListProductsQuery {
  fn options(&self) -> Result<ListOptions, AppError> {
    ListOptions::from_query(self.sort.as_deref(), self.limit.as_deref(), self.offset.as_deref())
      .map_err(AppError::from_listing)
  }
}

#[derive(Deserialize, Debug, Default)]
pub struct CategoriesQuery {
  pub categories: Option<String>,
  pub sort: Option<String>,
  pub limit: Option<String>,
  pub offset: Option<String>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state
    .product_service
    .get_all_products()
    .await
    .map_err(AppError::from_listing)?;
  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  match app_state.product_service.get_product_by_id(product_id).await? {
    Some(product) => Ok(HttpResponse::Ok().json(product)),
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::MissingResource("Product not found".to_string()))
    }
  }
}

#[instrument(name = "handler::create_product", skip(app_state, req_payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<ProductDraft>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.product_service.create_product(req_payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::update_product", skip(app_state, req_payload))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  req_payload: web::Json<ProductPatch>,
) -> Result<HttpResponse, AppError> {
  let updated = app_state
    .product_service
    .update_product(path.into_inner(), req_payload.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "updated": updated })))
}

#[instrument(name = "handler::delete_product", skip(app_state))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let deleted = app_state.product_service.delete_product(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "deleted": deleted })))
}

#[instrument(name = "handler::products_by_category", skip(app_state, query))]
pub async fn products_by_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let options = query.options()?;
  let products = app_state
    .product_service
    .get_products_by_category(path.into_inner(), options)
    .await
    .map_err(AppError::from_listing)?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::products_by_categories", skip(app_state, query), fields(categories = ?query.categories))]
pub async fn products_by_categories_handler(
  app_state: web::Data<AppState>,
  query: web::Query<CategoriesQuery>,
) -> Result<HttpResponse, AppError> {
  let query = query.into_inner();
  let options = ListOptions::from_query(query.sort.as_deref(), query.limit.as_deref(), query.offset.as_deref())
    .map_err(AppError::from_listing)?;
  let products = app_state
    .product_service
    .get_products_by_categories(query.categories.as_deref(), options)
    .await
    .map_err(AppError::from_listing)?;
  Ok(HttpResponse::Ok().json(products))
}
