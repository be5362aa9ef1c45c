// server/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use storefront::CategoryDraft;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

/// A missing or unreadable body is treated as a draft without a name, so the caller
/// gets the service's "name is required" message.
#[instrument(name = "handler::create_category", skip(app_state, req_payload))]
pub async fn create_category_handler(
  app_state: web::Data<AppState>,
  req_payload: Option<web::Json<CategoryDraft>>,
) -> Result<HttpResponse, AppError> {
  let draft = req_payload.map(web::Json::into_inner).unwrap_or_default();
  let category = app_state.category_service.create_category(draft).await?;
  Ok(HttpResponse::Created().json(category))
}

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = app_state.category_service.list_categories().await?;
  Ok(HttpResponse::Ok().json(categories))
}

#[instrument(name = "handler::get_category", skip(app_state))]
pub async fn get_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let category = app_state.category_service.get_category(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(category))
}
