// src/models/mod.rs

//! Plain records exchanged between services and repositories.

pub mod cart;
pub mod cart_item;
pub mod category;
pub mod product;

pub type CategoryId = i64;
pub type ProductId = i64;
pub type CartId = i64;
pub type CartItemId = i64;

pub use cart::{Cart, CartLine, CartSummary};
pub use cart_item::{CartItem, CartItemWithProduct};
pub use category::{Category, CategoryDraft};
pub use product::{Product, ProductDraft, ProductPatch, ProductWithCategory};
