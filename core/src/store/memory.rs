// src/store/memory.rs

//! `MemoryStore`: a lock-guarded, process-local repository.
//!
//! Used by tests, benchmarks and the `DATABASE_URL=memory` mode of the server. It mirrors
//! the SQLite store's behaviour, including foreign-key enforcement on cart items.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{CartRepository, CategoryRepository, NewProduct, ProductRepository};
use crate::error::{ShopError, ShopResult};
use crate::models::{
  Cart, CartId, CartItem, CartItemId, CartItemWithProduct, Category, CategoryId, Product, ProductId,
  ProductPatch, ProductWithCategory,
};
use crate::query::{ListOptions, SortDirection, SortField};

const FOREIGN_KEY_FAILED: &str = "FOREIGN KEY constraint failed";

#[derive(Debug, Default)]
struct Tables {
  categories: BTreeMap<CategoryId, Category>,
  products: BTreeMap<ProductId, Product>,
  carts: BTreeMap<CartId, Cart>,
  cart_items: BTreeMap<CartItemId, CartItem>,
  category_ids: Sequence,
  product_ids: Sequence,
  cart_ids: Sequence,
  cart_item_ids: Sequence,
}

/// Per-table id counter; ids start at 1 and are never reused, like AUTOINCREMENT.
#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
  fn next(&mut self) -> i64 {
    self.0 += 1;
    self.0
  }
}

impl Tables {
  fn joined_item(&self, item: &CartItem) -> ShopResult<CartItemWithProduct> {
    let product = self
      .products
      .get(&item.product_id)
      .cloned()
      .ok_or_else(|| ShopError::Persistence(FOREIGN_KEY_FAILED.to_string()))?;
    Ok(CartItemWithProduct {
      item: item.clone(),
      product,
    })
  }
}

/// In-memory repository. Clones share the same tables.
///
/// Lock guards are never held across `.await`; every method finishes its work under a
/// single guard.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Arc<RwLock<Tables>>);

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn read(&self) -> RwLockReadGuard<'_, Tables> {
    self.0.read()
  }

  fn write(&self) -> RwLockWriteGuard<'_, Tables> {
    self.0.write()
  }
}

fn compare_products(a: &Product, b: &Product, field: SortField) -> Ordering {
  let by_field = match field {
    SortField::Id => a.id.cmp(&b.id),
    SortField::Name => a.name.cmp(&b.name),
    SortField::Price => a.price.total_cmp(&b.price),
    SortField::Inventory => a.inventory.cmp(&b.inventory),
  };
  by_field.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl CategoryRepository for MemoryStore {
  async fn find_category(&self, id: CategoryId) -> ShopResult<Option<Category>> {
    Ok(self.read().categories.get(&id).cloned())
  }

  async fn list_categories(&self) -> ShopResult<Vec<Category>> {
    Ok(self.read().categories.values().cloned().collect())
  }

  async fn create_category(&self, name: &str) -> ShopResult<Category> {
    let mut tables = self.write();
    let category = Category {
      id: tables.category_ids.next(),
      name: name.to_string(),
    };
    tables.categories.insert(category.id, category.clone());
    Ok(category)
  }
}

#[async_trait]
impl ProductRepository for MemoryStore {
  async fn find_product(&self, id: ProductId) -> ShopResult<Option<Product>> {
    Ok(self.read().products.get(&id).cloned())
  }

  async fn list_products(&self) -> ShopResult<Vec<Product>> {
    Ok(self.read().products.values().cloned().collect())
  }

  async fn list_products_in_categories(
    &self,
    category_ids: &[CategoryId],
    options: &ListOptions,
  ) -> ShopResult<Vec<ProductWithCategory>> {
    let tables = self.read();
    let mut products: Vec<&Product> = tables
      .products
      .values()
      .filter(|product| category_ids.contains(&product.category_id))
      .collect();

    let sort = options.effective_sort();
    products.sort_by(|a, b| {
      let ordering = compare_products(a, b, sort.field);
      match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
      }
    });

    let offset = options.offset.unwrap_or(0) as usize;
    let limit = options.limit.map_or(usize::MAX, |limit| limit as usize);

    products
      .into_iter()
      .skip(offset)
      .take(limit)
      .map(|product| {
        let category = tables
          .categories
          .get(&product.category_id)
          .cloned()
          .ok_or_else(|| ShopError::Persistence(FOREIGN_KEY_FAILED.to_string()))?;
        Ok(ProductWithCategory {
          product: product.clone(),
          category,
        })
      })
      .collect()
  }

  async fn create_product(&self, product: &NewProduct) -> ShopResult<Product> {
    let mut tables = self.write();
    if !tables.categories.contains_key(&product.category_id) {
      return Err(ShopError::Persistence(FOREIGN_KEY_FAILED.to_string()));
    }
    let created = Product {
      id: tables.product_ids.next(),
      name: product.name.clone(),
      price: product.price,
      inventory: product.inventory,
      category_id: product.category_id,
    };
    tables.products.insert(created.id, created.clone());
    Ok(created)
  }

  async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> ShopResult<u64> {
    let mut tables = self.write();
    if let Some(category_id) = patch.category_id {
      if !tables.categories.contains_key(&category_id) {
        return Err(ShopError::Persistence(FOREIGN_KEY_FAILED.to_string()));
      }
    }
    match tables.products.get_mut(&id) {
      Some(product) => {
        patch.apply_to(product);
        Ok(1)
      }
      None => Ok(0),
    }
  }

  async fn delete_product(&self, id: ProductId) -> ShopResult<u64> {
    let mut tables = self.write();
    if tables.cart_items.values().any(|item| item.product_id == id) {
      return Err(ShopError::Persistence(FOREIGN_KEY_FAILED.to_string()));
    }
    Ok(u64::from(tables.products.remove(&id).is_some()))
  }
}

#[async_trait]
impl CartRepository for MemoryStore {
  async fn create_cart(&self, user_id: &str) -> ShopResult<Cart> {
    let mut tables = self.write();
    let now = Utc::now();
    let cart = Cart {
      id: tables.cart_ids.next(),
      user_id: user_id.to_string(),
      created_at: now,
      updated_at: now,
    };
    tables.carts.insert(cart.id, cart.clone());
    Ok(cart)
  }

  async fn find_cart(&self, id: CartId) -> ShopResult<Option<Cart>> {
    Ok(self.read().carts.get(&id).cloned())
  }

  async fn find_cart_item(&self, id: CartItemId) -> ShopResult<Option<CartItemWithProduct>> {
    let tables = self.read();
    tables.cart_items.get(&id).map(|item| tables.joined_item(item)).transpose()
  }

  async fn find_cart_item_for_product(
    &self,
    cart_id: CartId,
    product_id: ProductId,
  ) -> ShopResult<Option<CartItem>> {
    Ok(
      self
        .read()
        .cart_items
        .values()
        .find(|item| item.cart_id == cart_id && item.product_id == product_id)
        .cloned(),
    )
  }

  async fn list_cart_items(&self, cart_id: CartId) -> ShopResult<Vec<CartItemWithProduct>> {
    let tables = self.read();
    tables
      .cart_items
      .values()
      .filter(|item| item.cart_id == cart_id)
      .map(|item| tables.joined_item(item))
      .collect()
  }

  async fn create_cart_item(&self, cart_id: CartId, product_id: ProductId, quantity: i64) -> ShopResult<CartItem> {
    let mut tables = self.write();
    if !tables.carts.contains_key(&cart_id) || !tables.products.contains_key(&product_id) {
      return Err(ShopError::Persistence(FOREIGN_KEY_FAILED.to_string()));
    }
    let item = CartItem {
      id: tables.cart_item_ids.next(),
      cart_id,
      product_id,
      quantity,
    };
    tables.cart_items.insert(item.id, item.clone());
    Ok(item)
  }

  async fn update_cart_item_quantity(&self, id: CartItemId, quantity: i64) -> ShopResult<Option<CartItem>> {
    let mut tables = self.write();
    Ok(tables.cart_items.get_mut(&id).map(|item| {
      item.quantity = quantity;
      item.clone()
    }))
  }

  async fn delete_cart_item(&self, id: CartItemId) -> ShopResult<u64> {
    Ok(u64::from(self.write().cart_items.remove(&id).is_some()))
  }
}
