// src/services/mod.rs

//! Business operations over an injected `Arc<dyn Repository>`.
//!
//! Services validate their input before touching the repository and let repository
//! failures through untouched.

pub mod cart_service;
pub mod category_service;
pub mod product_service;
pub mod seed;

pub use cart_service::CartService;
pub use category_service::CategoryService;
pub use product_service::ProductService;
pub use seed::seed_demo_catalog;
