// src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Category, CategoryId, ProductId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub price: f64,
  pub inventory: i64,
  pub category_id: CategoryId,
}

/// A product together with the category it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategory {
  #[serde(flatten)]
  pub product: Product,
  pub category: Category,
}

/// Input for product creation, as received from callers. Required fields are checked
/// by `ProductService::create_product`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
  pub name: Option<String>,
  pub price: Option<f64>,
  pub inventory: Option<i64>,
  pub category_id: Option<CategoryId>,
}

impl ProductDraft {
  pub fn new(name: impl Into<String>, category_id: CategoryId) -> Self {
    Self {
      name: Some(name.into()),
      category_id: Some(category_id),
      ..Self::default()
    }
  }

  pub fn with_price(mut self, price: f64) -> Self {
    self.price = Some(price);
    self
  }

  pub fn with_inventory(mut self, inventory: i64) -> Self {
    self.inventory = Some(inventory);
    self
  }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
  pub name: Option<String>,
  pub price: Option<f64>,
  pub inventory: Option<i64>,
  pub category_id: Option<CategoryId>,
}

impl ProductPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.price.is_none() && self.inventory.is_none() && self.category_id.is_none()
  }

  /// Applies the patch onto an existing record.
  pub fn apply_to(&self, product: &mut Product) {
    if let Some(name) = &self.name {
      product.name = name.clone();
    }
    if let Some(price) = self.price {
      product.price = price;
    }
    if let Some(inventory) = self.inventory {
      product.inventory = inventory;
    }
    if let Some(category_id) = self.category_id {
      product.category_id = category_id;
    }
  }
}
