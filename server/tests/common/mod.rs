// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;

use storefront::store::NewProduct;
use storefront::{
  Cart, CartId, CartItem, CartItemId, CartItemWithProduct, CartRepository, Category, CategoryId, CategoryRepository,
  ListOptions, Product, ProductId, ProductPatch, ProductRepository, ProductWithCategory, ShopError, ShopResult,
  SqliteStore,
};
use storefront_server::config::AppConfig;
use storefront_server::state::AppState;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// State over a fresh in-memory SQLite database.
pub async fn sqlite_state() -> AppState {
  setup_tracing();
  let store = SqliteStore::in_memory().await.expect("in-memory database");
  AppState::new(Arc::new(store), Arc::new(AppConfig::default()))
}

/// State over a store whose every call fails with `message`.
pub fn broken_state(message: &str) -> AppState {
  setup_tracing();
  AppState::new(Arc::new(BrokenStore(message.to_string())), Arc::new(AppConfig::default()))
}

/// A repository that is always down.
pub struct BrokenStore(pub String);

impl BrokenStore {
  fn fail<T>(&self) -> ShopResult<T> {
    Err(ShopError::Persistence(self.0.clone()))
  }
}

#[async_trait]
impl CategoryRepository for BrokenStore {
  async fn find_category(&self, _id: CategoryId) -> ShopResult<Option<Category>> {
    self.fail()
  }

  async fn list_categories(&self) -> ShopResult<Vec<Category>> {
    self.fail()
  }

  async fn create_category(&self, _name: &str) -> ShopResult<Category> {
    self.fail()
  }
}

#[async_trait]
impl ProductRepository for BrokenStore {
  async fn find_product(&self, _id: ProductId) -> ShopResult<Option<Product>> {
    self.fail()
  }

  async fn list_products(&self) -> ShopResult<Vec<Product>> {
    self.fail()
  }

  async fn list_products_in_categories(
    &self,
    _category_ids: &[CategoryId],
    _options: &ListOptions,
  ) -> ShopResult<Vec<ProductWithCategory>> {
    self.fail()
  }

  async fn create_product(&self, _product: &NewProduct) -> ShopResult<Product> {
    self.fail()
  }

  async fn update_product(&self, _id: ProductId, _patch: &ProductPatch) -> ShopResult<u64> {
    self.fail()
  }

  async fn delete_product(&self, _id: ProductId) -> ShopResult<u64> {
    self.fail()
  }
}

#[async_trait]
impl CartRepository for BrokenStore {
  async fn create_cart(&self, _user_id: &str) -> ShopResult<Cart> {
    self.fail()
  }

  async fn find_cart(&self, _id: CartId) -> ShopResult<Option<Cart>> {
    self.fail()
  }

  async fn find_cart_item(&self, _id: CartItemId) -> ShopResult<Option<CartItemWithProduct>> {
    self.fail()
  }

  async fn find_cart_item_for_product(
    &self,
    _cart_id: CartId,
    _product_id: ProductId,
  ) -> ShopResult<Option<CartItem>> {
    self.fail()
  }

  async fn list_cart_items(&self, _cart_id: CartId) -> ShopResult<Vec<CartItemWithProduct>> {
    self.fail()
  }

  async fn create_cart_item(&self, _cart_id: CartId, _product_id: ProductId, _quantity: i64) -> ShopResult<CartItem> {
    self.fail()
  }

  async fn update_cart_item_quantity(&self, _id: CartItemId, _quantity: i64) -> ShopResult<Option<CartItem>> {
    self.fail()
  }

  async fn delete_cart_item(&self, _id: CartItemId) -> ShopResult<u64> {
    self.fail()
  }
}
