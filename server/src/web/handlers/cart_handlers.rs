// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddItemPayload {
  pub product_id: i64,
  pub quantity: i64,
}

#[derive(Deserialize, Debug)]
pub struct UpdateItemPayload {
  pub quantity: i64,
}

// --- Handler Implementations ---

#[instrument(name = "handler::create_cart", skip(app_state))]
pub async fn create_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let cart = app_state.cart_service.create_cart(&user_id).await?;
  info!(cart_id = cart.id, "Cart created for user {}.", cart.user_id);
  Ok(HttpResponse::Created().json(cart))
}

#[instrument(name = "handler::get_cart", skip(app_state))]
pub async fn get_cart_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
  let cart = app_state.cart_service.get_cart(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(cart))
}

#[instrument(
    name = "handler::add_item",
    skip(app_state, req_payload),
    fields(product_id = %req_payload.product_id, quantity = %req_payload.quantity)
)]
pub async fn add_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  req_payload: web::Json<AddItemPayload>,
) -> Result<HttpResponse, AppError> {
  let cart_id = path.into_inner();
  let item = app_state
    .cart_service
    .add_item_to_cart(cart_id, req_payload.product_id, req_payload.quantity)
    .await?;
  info!(
    "Item {} stored in cart {} with quantity {}.",
    item.id, cart_id, item.quantity
  );
  Ok(HttpResponse::Created().json(item))
}

#[instrument(name = "handler::list_items", skip(app_state))]
pub async fn list_items_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
  let summary = app_state.cart_service.get_cart_items(Some(path.into_inner())).await?;
  Ok(HttpResponse::Ok().json(summary))
}

/// The cart id in the path is informational; items are addressed by their own id.
#[instrument(name = "handler::update_item", skip(app_state, req_payload), fields(quantity = %req_payload.quantity))]
pub async fn update_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(i64, i64)>,
  req_payload: web::Json<UpdateItemPayload>,
) -> Result<HttpResponse, AppError> {
  let (_cart_id, item_id) = path.into_inner();
  let item = app_state
    .cart_service
    .update_cart_item(item_id, req_payload.quantity)
    .await?;
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(name = "handler::remove_item", skip(app_state))]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
  let (_cart_id, item_id) = path.into_inner();
  app_state.cart_service.remove_cart_item(item_id).await?;
  Ok(HttpResponse::NoContent().finish())
}
