// src/models/cart.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{CartId, CartItem, CartItemWithProduct, Product};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
  pub id: CartId,
  pub user_id: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// One row of a cart listing: the item, its product and `quantity * price`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  #[serde(flatten)]
  pub item: CartItem,
  pub product: Product,
  pub line_total: f64,
}

impl From<CartItemWithProduct> for CartLine {
  fn from(joined: CartItemWithProduct) -> Self {
    let line_total = joined.item.quantity as f64 * joined.product.price;
    Self {
      item: joined.item,
      product: joined.product,
      line_total,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
  pub items: Vec<CartLine>,
  pub total: f64,
}

impl CartSummary {
  pub fn from_lines(items: Vec<CartLine>) -> Self {
    let total = items.iter().map(|line| line.line_total).sum();
    Self { items, total }
  }
}
