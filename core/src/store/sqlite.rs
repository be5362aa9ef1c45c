// src/store/sqlite.rs

//! `SqliteStore`: the `sqlx`-backed repository.
//!
//! Queries are checked at runtime (`query`, `query_as`, `QueryBuilder`) so the crate
//! builds without a live database. Foreign keys are switched on for every connection.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use std::str::FromStr;
use tracing::{debug, info, instrument};

use super::{CartRepository, CategoryRepository, NewProduct, ProductRepository};
use crate::error::ShopResult;
use crate::models::{
  Cart, CartId, CartItem, CartItemId, CartItemWithProduct, Category, CategoryId, Product, ProductId,
  ProductPatch, ProductWithCategory,
};
use crate::query::ListOptions;

const SCHEMA: &[&str] = &[
  "CREATE TABLE IF NOT EXISTS categories (
     id INTEGER PRIMARY KEY AUTOINCREMENT,
     name TEXT NOT NULL
   )",
  "CREATE TABLE IF NOT EXISTS products (
     id INTEGER PRIMARY KEY AUTOINCREMENT,
     name TEXT NOT NULL,
     price REAL NOT NULL DEFAULT 0,
     inventory INTEGER NOT NULL DEFAULT 0 CHECK (inventory >= 0),
     category_id INTEGER NOT NULL REFERENCES categories (id)
   )",
  "CREATE TABLE IF NOT EXISTS carts (
     id INTEGER PRIMARY KEY AUTOINCREMENT,
     user_id TEXT NOT NULL,
     created_at TEXT NOT NULL,
     updated_at TEXT NOT NULL
   )",
  "CREATE TABLE IF NOT EXISTS cart_items (
     id INTEGER PRIMARY KEY AUTOINCREMENT,
     cart_id INTEGER NOT NULL REFERENCES carts (id),
     product_id INTEGER NOT NULL REFERENCES products (id),
     quantity INTEGER NOT NULL CHECK (quantity > 0)
   )",
  "CREATE INDEX IF NOT EXISTS idx_products_category ON products (category_id)",
  "CREATE INDEX IF NOT EXISTS idx_cart_items_cart ON cart_items (cart_id)",
];

const PRODUCT_COLUMNS: &str = "id, name, price, inventory, category_id";
const CART_COLUMNS: &str = "id, user_id, created_at, updated_at";
const CART_ITEM_COLUMNS: &str = "id, cart_id, product_id, quantity";

const CART_ITEM_WITH_PRODUCT: &str = "SELECT ci.id, ci.cart_id, ci.product_id, ci.quantity, \
   p.name AS product_name, p.price AS product_price, p.inventory AS product_inventory, \
   p.category_id AS product_category_id \
   FROM cart_items ci JOIN products p ON p.id = ci.product_id";

#[derive(Debug, Clone)]
pub struct SqliteStore {
  pool: SqlitePool,
}

impl SqliteStore {
  /// Opens a pool for `url` (e.g. `sqlite://db.sqlite?mode=rwc` or `sqlite::memory:`).
  ///
  /// In-memory databases live as long as their connection, so they get a single
  /// connection that never idles out.
  pub async fn connect(url: &str, max_connections: u32) -> ShopResult<Self> {
    let options = SqliteConnectOptions::from_str(url)?
      .create_if_missing(true)
      .foreign_keys(true);

    let in_memory = url.contains(":memory:") || url.contains("mode=memory");
    let pool_options = if in_memory {
      SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
    } else {
      SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options.connect_with(options).await?;
    info!(in_memory, "Connected to SQLite database.");
    Ok(Self { pool })
  }

  /// Connects to a fresh in-memory database and creates the schema.
  pub async fn in_memory() -> ShopResult<Self> {
    let store = Self::connect("sqlite::memory:", 1).await?;
    store.migrate().await?;
    Ok(store)
  }

  /// Creates any missing tables and indexes.
  #[instrument(name = "SqliteStore::migrate", skip(self), err(Display))]
  pub async fn migrate(&self) -> ShopResult<()> {
    for statement in SCHEMA {
      sqlx::query(statement).execute(&self.pool).await?;
    }
    info!("Database schema is up to date.");
    Ok(())
  }

  pub async fn close(&self) {
    self.pool.close().await;
    info!("SQLite pool closed.");
  }
}

fn product_with_category(row: &SqliteRow) -> Result<ProductWithCategory, sqlx::Error> {
  let category_id: i64 = row.try_get("category_id")?;
  Ok(ProductWithCategory {
    product: Product {
      id: row.try_get("id")?,
      name: row.try_get("name")?,
      price: row.try_get("price")?,
      inventory: row.try_get("inventory")?,
      category_id,
    },
    category: Category {
      id: category_id,
      name: row.try_get("category_name")?,
    },
  })
}

fn cart_item_with_product(row: &SqliteRow) -> Result<CartItemWithProduct, sqlx::Error> {
  let product_id: i64 = row.try_get("product_id")?;
  Ok(CartItemWithProduct {
    item: CartItem {
      id: row.try_get("id")?,
      cart_id: row.try_get("cart_id")?,
      product_id,
      quantity: row.try_get("quantity")?,
    },
    product: Product {
      id: product_id,
      name: row.try_get("product_name")?,
      price: row.try_get("product_price")?,
      inventory: row.try_get("product_inventory")?,
      category_id: row.try_get("product_category_id")?,
    },
  })
}

#[async_trait]
impl CategoryRepository for SqliteStore {
  async fn find_category(&self, id: CategoryId) -> ShopResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(category)
  }

  async fn list_categories(&self) -> ShopResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
      .fetch_all(&self.pool)
      .await?;
    Ok(categories)
  }

  async fn create_category(&self, name: &str) -> ShopResult<Category> {
    let category = sqlx::query_as::<_, Category>("INSERT INTO categories (name) VALUES (?) RETURNING id, name")
      .bind(name)
      .fetch_one(&self.pool)
      .await?;
    debug!(category_id = category.id, "Inserted category.");
    Ok(category)
  }
}

#[async_trait]
impl ProductRepository for SqliteStore {
  async fn find_product(&self, id: ProductId) -> ShopResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!("SELECT {} FROM products WHERE id = ?", PRODUCT_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(product)
  }

  async fn list_products(&self) -> ShopResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!("SELECT {} FROM products ORDER BY id", PRODUCT_COLUMNS))
      .fetch_all(&self.pool)
      .await?;
    Ok(products)
  }

  async fn list_products_in_categories(
    &self,
    category_ids: &[CategoryId],
    options: &ListOptions,
  ) -> ShopResult<Vec<ProductWithCategory>> {
    if category_ids.is_empty() {
      return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(
      "SELECT p.id, p.name, p.price, p.inventory, p.category_id, c.name AS category_name \
       FROM products p JOIN categories c ON c.id = p.category_id WHERE p.category_id IN (",
    );
    let mut ids = builder.separated(", ");
    for id in category_ids {
      ids.push_bind(*id);
    }
    builder.push(")");

    // Column names come from the SortField allow-list, never from the caller.
    let sort = options.effective_sort();
    builder.push(format!(
      " ORDER BY p.{} {}, p.id ASC",
      sort.field.column(),
      sort.direction.as_sql()
    ));

    if options.limit.is_some() || options.offset.is_some() {
      // SQLite only accepts OFFSET after a LIMIT; -1 means "no limit".
      builder.push(" LIMIT ");
      builder.push_bind(options.limit.map_or(-1, i64::from));
      builder.push(" OFFSET ");
      builder.push_bind(i64::from(options.offset.unwrap_or(0)));
    }

    let rows = builder.build().fetch_all(&self.pool).await?;
    let products = rows
      .iter()
      .map(product_with_category)
      .collect::<Result<Vec<_>, sqlx::Error>>()?;
    Ok(products)
  }

  async fn create_product(&self, product: &NewProduct) -> ShopResult<Product> {
    let created = sqlx::query_as::<_, Product>(&format!(
      "INSERT INTO products (name, price, inventory, category_id) VALUES (?, ?, ?, ?) RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(&product.name)
    .bind(product.price)
    .bind(product.inventory)
    .bind(product.category_id)
    .fetch_one(&self.pool)
    .await?;
    debug!(product_id = created.id, "Inserted product.");
    Ok(created)
  }

  async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> ShopResult<u64> {
    if patch.is_empty() {
      return Ok(u64::from(self.find_product(id).await?.is_some()));
    }

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE products SET ");
    let mut assignments = builder.separated(", ");
    if let Some(name) = &patch.name {
      assignments.push("name = ");
      assignments.push_bind_unseparated(name.clone());
    }
    if let Some(price) = patch.price {
      assignments.push("price = ");
      assignments.push_bind_unseparated(price);
    }
    if let Some(inventory) = patch.inventory {
      assignments.push("inventory = ");
      assignments.push_bind_unseparated(inventory);
    }
    if let Some(category_id) = patch.category_id {
      assignments.push("category_id = ");
      assignments.push_bind_unseparated(category_id);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(&self.pool).await?;
    Ok(result.rows_affected())
  }

  async fn delete_product(&self, id: ProductId) -> ShopResult<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }
}

#[async_trait]
impl CartRepository for SqliteStore {
  async fn create_cart(&self, user_id: &str) -> ShopResult<Cart> {
    let now = Utc::now();
    let cart = sqlx::query_as::<_, Cart>(&format!(
      "INSERT INTO carts (user_id, created_at, updated_at) VALUES (?, ?, ?) RETURNING {}",
      CART_COLUMNS
    ))
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(&self.pool)
    .await?;
    debug!(cart_id = cart.id, "Inserted cart.");
    Ok(cart)
  }

  async fn find_cart(&self, id: CartId) -> ShopResult<Option<Cart>> {
    let cart = sqlx::query_as::<_, Cart>(&format!("SELECT {} FROM carts WHERE id = ?", CART_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(cart)
  }

  async fn find_cart_item(&self, id: CartItemId) -> ShopResult<Option<CartItemWithProduct>> {
    let row = sqlx::query(&format!("{} WHERE ci.id = ?", CART_ITEM_WITH_PRODUCT))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(row.as_ref().map(cart_item_with_product).transpose()?)
  }

  async fn find_cart_item_for_product(
    &self,
    cart_id: CartId,
    product_id: ProductId,
  ) -> ShopResult<Option<CartItem>> {
    let item = sqlx::query_as::<_, CartItem>(&format!(
      "SELECT {} FROM cart_items WHERE cart_id = ? AND product_id = ? ORDER BY id LIMIT 1",
      CART_ITEM_COLUMNS
    ))
    .bind(cart_id)
    .bind(product_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(item)
  }

  async fn list_cart_items(&self, cart_id: CartId) -> ShopResult<Vec<CartItemWithProduct>> {
    let rows = sqlx::query(&format!("{} WHERE ci.cart_id = ? ORDER BY ci.id", CART_ITEM_WITH_PRODUCT))
      .bind(cart_id)
      .fetch_all(&self.pool)
      .await?;
    let items = rows
      .iter()
      .map(cart_item_with_product)
      .collect::<Result<Vec<_>, sqlx::Error>>()?;
    Ok(items)
  }

  async fn create_cart_item(&self, cart_id: CartId, product_id: ProductId, quantity: i64) -> ShopResult<CartItem> {
    let item = sqlx::query_as::<_, CartItem>(&format!(
      "INSERT INTO cart_items (cart_id, product_id, quantity) VALUES (?, ?, ?) RETURNING {}",
      CART_ITEM_COLUMNS
    ))
    .bind(cart_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(&self.pool)
    .await?;
    debug!(cart_item_id = item.id, "Inserted cart item.");
    Ok(item)
  }

  async fn update_cart_item_quantity(&self, id: CartItemId, quantity: i64) -> ShopResult<Option<CartItem>> {
    let item = sqlx::query_as::<_, CartItem>(&format!(
      "UPDATE cart_items SET quantity = ? WHERE id = ? RETURNING {}",
      CART_ITEM_COLUMNS
    ))
    .bind(quantity)
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(item)
  }

  async fn delete_cart_item(&self, id: CartItemId) -> ShopResult<u64> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }
}
