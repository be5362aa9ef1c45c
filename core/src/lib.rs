// src/lib.rs

//! Storefront: catalog, cart and inventory services for a small e-commerce backend.
//!
//! The crate is organised leaf-first:
//!  - `models`: plain value structs for categories, products, carts and cart items.
//!  - `query`: structured list options (sort descriptor, limit, offset).
//!  - `inventory`: the stock admissibility policy.
//!  - `store`: the persistence gateway traits plus in-memory and SQLite implementations.
//!  - `services`: `CartService`, `ProductService` and `CategoryService`, which validate
//!    input and orchestrate calls against an injected `Arc<dyn Repository>`.
//!
//! Services never hold persistence objects; they receive and return records and call
//! explicit `create`/`update`/`delete` operations on the repository.

pub mod error;
pub mod inventory;
pub mod models;
pub mod query;
pub mod services;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{ShopError, ShopResult};
pub use crate::inventory::{check_availability, validate_quantity};
pub use crate::models::{
  Cart, CartId, CartItem, CartItemId, CartItemWithProduct, CartLine, CartSummary, Category, CategoryDraft,
  CategoryId, Product, ProductDraft, ProductId, ProductPatch, ProductWithCategory,
};
pub use crate::query::{ListOptions, ProductSort, SortDirection, SortField};
pub use crate::services::{seed_demo_catalog, CartService, CategoryService, ProductService};
pub use crate::store::{
  CartRepository, CategoryRepository, MemoryStore, ProductRepository, Repository, SqliteStore,
};
