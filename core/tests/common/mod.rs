// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Level;

use storefront::store::NewProduct;
use storefront::{
  Cart, CartId, CartItem, CartItemId, CartItemWithProduct, CartRepository, Category, CategoryId, CategoryRepository,
  MemoryStore, Product, ProductId, ProductPatch, ProductRepository, ProductWithCategory, ShopError, ShopResult,
};
use storefront::ListOptions;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
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

/// Wraps a `MemoryStore`, records every repository call by name and can be told to
/// fail specific calls.
#[derive(Clone, Default)]
pub struct RecordingStore {
  inner: MemoryStore,
  calls: Arc<Mutex<Vec<&'static str>>>,
  failures: Arc<Mutex<HashMap<&'static str, String>>>,
}

impl RecordingStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Direct access to the wrapped store for arranging fixtures without recording.
  pub fn inner(&self) -> &MemoryStore {
    &self.inner
  }

  /// Makes every later call to `operation` fail with `ShopError::Persistence(message)`.
  pub fn fail_on(&self, operation: &'static str, message: &str) {
    self.failures.lock().insert(operation, message.to_string());
  }

  pub fn calls(&self) -> Vec<&'static str> {
    self.calls.lock().clone()
  }

  pub fn was_called(&self, operation: &str) -> bool {
    self.calls.lock().iter().any(|call| *call == operation)
  }

  pub fn call_count(&self, operation: &str) -> usize {
    self.calls.lock().iter().filter(|call| **call == operation).count()
  }

  pub fn clear_calls(&self) {
    self.calls.lock().clear();
  }

  fn record(&self, operation: &'static str) -> ShopResult<()> {
    self.calls.lock().push(operation);
    match self.failures.lock().get(operation) {
      Some(message) => Err(ShopError::Persistence(message.clone())),
      None => Ok(()),
    }
  }
}

#[async_trait]
impl CategoryRepository for RecordingStore {
  async fn find_category(&self, id: CategoryId) -> ShopResult<Option<Category>> {
    self.record("find_category")?;
    self.inner.find_category(id).await
  }

  async fn list_categories(&self) -> ShopResult<Vec<Category>> {
    self.record("list_categories")?;
    self.inner.list_categories().await
  }

  async fn create_category(&self, name: &str) -> ShopResult<Category> {
    self.record("create_category")?;
    self.inner.create_category(name).await
  }
}

#[async_trait]
impl ProductRepository for RecordingStore {
  async fn find_product(&self, id: ProductId) -> ShopResult<Option<Product>> {
    self.record("find_product")?;
    self.inner.find_product(id).await
  }

  async fn list_products(&self) -> ShopResult<Vec<Product>> {
    self.record("list_products")?;
    self.inner.list_products().await
  }

  async fn list_products_in_categories(
    &self,
    category_ids: &[CategoryId],
    options: &ListOptions,
  ) -> ShopResult<Vec<ProductWithCategory>> {
    self.record("list_products_in_categories")?;
    self.inner.list_products_in_categories(category_ids, options).await
  }

  async fn create_product(&self, product: &NewProduct) -> ShopResult<Product> {
    self.record("create_product")?;
    self.inner.create_product(product).await
  }

  async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> ShopResult<u64> {
    self.record("update_product")?;
    self.inner.update_product(id, patch).await
  }

  async fn delete_product(&self, id: ProductId) -> ShopResult<u64> {
    self.record("delete_product")?;
    self.inner.delete_product(id).await
  }
}

#[async_trait]
impl CartRepository for RecordingStore {
  async fn create_cart(&self, user_id: &str) -> ShopResult<Cart> {
    self.record("create_cart")?;
    self.inner.create_cart(user_id).await
  }

  async fn find_cart(&self, id: CartId) -> ShopResult<Option<Cart>> {
    self.record("find_cart")?;
    self.inner.find_cart(id).await
  }

  async fn find_cart_item(&self, id: CartItemId) -> ShopResult<Option<CartItemWithProduct>> {
    self.record("find_cart_item")?;
    self.inner.find_cart_item(id).await
  }

  async fn find_cart_item_for_product(
    &self,
    cart_id: CartId,
    product_id: ProductId,
  ) -> ShopResult<Option<CartItem>> {
    self.record("find_cart_item_for_product")?;
    self.inner.find_cart_item_for_product(cart_id, product_id).await
  }

  async fn list_cart_items(&self, cart_id: CartId) -> ShopResult<Vec<CartItemWithProduct>> {
    self.record("list_cart_items")?;
    self.inner.list_cart_items(cart_id).await
  }

  async fn create_cart_item(&self, cart_id: CartId, product_id: ProductId, quantity: i64) -> ShopResult<CartItem> {
    self.record("create_cart_item")?;
    self.inner.create_cart_item(cart_id, product_id, quantity).await
  }

  async fn update_cart_item_quantity(&self, id: CartItemId, quantity: i64) -> ShopResult<Option<CartItem>> {
    self.record("update_cart_item_quantity")?;
    self.inner.update_cart_item_quantity(id, quantity).await
  }

  async fn delete_cart_item(&self, id: CartItemId) -> ShopResult<u64> {
    self.record("delete_cart_item")?;
    self.inner.delete_cart_item(id).await
  }
}

// --- Fixtures ---

/// A category plus one product with the given price and inventory, created directly
/// on the wrapped store.
pub async fn seed_product(store: &RecordingStore, price: f64, inventory: i64) -> (Category, Product) {
  let category = store.inner().create_category("Electronics").await.unwrap();
  let product = store
    .inner()
    .create_product(&NewProduct {
      name: "Test Product".to_string(),
      price,
      inventory,
      category_id: category.id,
    })
    .await
    .unwrap();
  (category, product)
}

pub async fn seed_cart(store: &RecordingStore) -> Cart {
  store.inner().create_cart("user-1").await.unwrap()
}
