// src/models/cart_item.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{CartId, CartItemId, Product, ProductId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub id: CartItemId,
  pub cart_id: CartId,
  pub product_id: ProductId,
  pub quantity: i64,
}

/// A cart item joined with its product, as loaded for stock checks and totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemWithProduct {
  pub item: CartItem,
  pub product: Product,
}
