// src/store/mod.rs

//! The persistence gateway.
//!
//! Services depend on these traits only, through a single `Arc<dyn Repository>` handed
//! to them at construction. Every method either resolves with records or a row count,
//! or fails with a `ShopError` that services pass through unchanged.

use async_trait::async_trait;

use crate::error::ShopResult;
use crate::models::{
  Cart, CartId, CartItem, CartItemId, CartItemWithProduct, Category, CategoryId, Product, ProductId,
  ProductPatch, ProductWithCategory,
};
use crate::query::ListOptions;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Validated values for a product insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
  pub name: String,
  pub price: f64,
  pub inventory: i64,
  pub category_id: CategoryId,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
  async fn find_category(&self, id: CategoryId) -> ShopResult<Option<Category>>;

  async fn list_categories(&self) -> ShopResult<Vec<Category>>;

  async fn create_category(&self, name: &str) -> ShopResult<Category>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
  async fn find_product(&self, id: ProductId) -> ShopResult<Option<Product>>;

  async fn list_products(&self) -> ShopResult<Vec<Product>>;

  /// Products whose category is one of `category_ids`, joined with that category.
  async fn list_products_in_categories(
    &self,
    category_ids: &[CategoryId],
    options: &ListOptions,
  ) -> ShopResult<Vec<ProductWithCategory>>;

  async fn create_product(&self, product: &NewProduct) -> ShopResult<Product>;

  /// Returns the number of rows changed (0 when `id` does not exist).
  async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> ShopResult<u64>;

  /// Returns the number of rows removed (0 when `id` does not exist).
  async fn delete_product(&self, id: ProductId) -> ShopResult<u64>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
  async fn create_cart(&self, user_id: &str) -> ShopResult<Cart>;

  async fn find_cart(&self, id: CartId) -> ShopResult<Option<Cart>>;

  async fn find_cart_item(&self, id: CartItemId) -> ShopResult<Option<CartItemWithProduct>>;

  async fn find_cart_item_for_product(&self, cart_id: CartId, product_id: ProductId)
    -> ShopResult<Option<CartItem>>;

  async fn list_cart_items(&self, cart_id: CartId) -> ShopResult<Vec<CartItemWithProduct>>;

  async fn create_cart_item(&self, cart_id: CartId, product_id: ProductId, quantity: i64) -> ShopResult<CartItem>;

  /// Sets the quantity of an item, returning the updated row if it exists.
  async fn update_cart_item_quantity(&self, id: CartItemId, quantity: i64) -> ShopResult<Option<CartItem>>;

  async fn delete_cart_item(&self, id: CartItemId) -> ShopResult<u64>;
}

/// Everything the services need from a store.
pub trait Repository: CategoryRepository + ProductRepository + CartRepository {}

impl<T> Repository for T where T: CategoryRepository + ProductRepository + CartRepository {}
