// server/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use storefront::{CartService, CategoryService, ProductService, Repository};

/// Shared by every worker; services are cheap clones over one repository handle.
#[derive(Clone)]
pub struct AppState {
  pub cart_service: CartService,
  pub product_service: ProductService,
  pub category_service: CategoryService,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn new(repo: Arc<dyn Repository>, config: Arc<AppConfig>) -> Self {
    Self {
      cart_service: CartService::new(repo.clone()),
      product_service: ProductService::new(repo.clone()),
      category_service: CategoryService::new(repo),
      config,
    }
  }
}
