// src/services/category_service.rs

use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{ShopError, ShopResult};
use crate::models::{Category, CategoryDraft, CategoryId};
use crate::store::Repository;

#[derive(Clone)]
pub struct CategoryService {
  repo: Arc<dyn Repository>,
}

impl CategoryService {
  pub fn new(repo: Arc<dyn Repository>) -> Self {
    Self { repo }
  }

  #[instrument(name = "CategoryService::create_category", skip(self), err(Display))]
  pub async fn create_category(&self, draft: CategoryDraft) -> ShopResult<Category> {
    let name = match draft.name.as_deref().map(str::trim) {
      Some(name) if !name.is_empty() => name,
      _ => return Err(ShopError::validation("Category name is required")),
    };
    let category = self.repo.create_category(name).await?;
    info!(category_id = category.id, "Category created.");
    Ok(category)
  }

  #[instrument(name = "CategoryService::list_categories", skip(self), err(Display))]
  pub async fn list_categories(&self) -> ShopResult<Vec<Category>> {
    self.repo.list_categories().await
  }

  #[instrument(name = "CategoryService::get_category", skip(self), err(Display))]
  pub async fn get_category(&self, id: CategoryId) -> ShopResult<Category> {
    self
      .repo
      .find_category(id)
      .await?
      .ok_or_else(|| ShopError::category_missing(id))
  }
}
