// src/services/product_service.rs

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{ShopError, ShopResult};
use crate::models::{CategoryId, Product, ProductDraft, ProductId, ProductPatch, ProductWithCategory};
use crate::query::ListOptions;
use crate::store::{NewProduct, Repository};

/// Category-aware product CRUD and listing.
#[derive(Clone)]
pub struct ProductService {
  repo: Arc<dyn Repository>,
}

impl ProductService {
  pub fn new(repo: Arc<dyn Repository>) -> Self {
    Self { repo }
  }

  #[instrument(name = "ProductService::get_all_products", skip(self), err(Display))]
  pub async fn get_all_products(&self) -> ShopResult<Vec<Product>> {
    let products = self.repo.list_products().await?;
    debug!(count = products.len(), "Products loaded.");
    Ok(products)
  }

  /// A missing product is `Ok(None)`.
  #[instrument(name = "ProductService::get_product_by_id", skip(self), err(Display))]
  pub async fn get_product_by_id(&self, id: ProductId) -> ShopResult<Option<Product>> {
    self.repo.find_product(id).await
  }

  /// Validates the draft, checks the category exists, then inserts.
  ///
  /// Name and category id are checked before any repository call; an unknown category
  /// stops the insert.
  #[instrument(name = "ProductService::create_product", skip(self), err(Display))]
  pub async fn create_product(&self, draft: ProductDraft) -> ShopResult<Product> {
    let name = match draft.name.as_deref().map(str::trim) {
      Some(name) if !name.is_empty() => name.to_string(),
      _ => return Err(ShopError::validation("Product name is required")),
    };
    let category_id = draft
      .category_id
      .ok_or_else(|| ShopError::validation("Category ID is required"))?;
    let price = draft.price.unwrap_or(0.0);
    let inventory = draft.inventory.unwrap_or(0);
    validate_amounts(price, inventory)?;

    self.ensure_category_exists(category_id).await?;

    let product = self
      .repo
      .create_product(&NewProduct {
        name,
        price,
        inventory,
        category_id,
      })
      .await?;
    info!(product_id = product.id, "Product created.");
    Ok(product)
  }

  #[instrument(name = "ProductService::get_products_by_category", skip(self), err(Display))]
  pub async fn get_products_by_category(
    &self,
    category_id: CategoryId,
    options: ListOptions,
  ) -> ShopResult<Vec<ProductWithCategory>> {
    self.repo.list_products_in_categories(&[category_id], &options).await
  }

  /// Lists products across a comma-separated list of category ids, e.g. `"1,2"`.
  #[instrument(name = "ProductService::get_products_by_categories", skip(self), err(Display))]
  pub async fn get_products_by_categories(
    &self,
    categories: Option<&str>,
    options: ListOptions,
  ) -> ShopResult<Vec<ProductWithCategory>> {
    let raw = categories
      .map(str::trim)
      .filter(|raw| !raw.is_empty())
      .ok_or_else(|| ShopError::validation("Categories parameter is required"))?;

    let category_ids = parse_category_ids(raw)?;
    let products = self.repo.list_products_in_categories(&category_ids, &options).await?;
    debug!(count = products.len(), categories = ?category_ids, "Products loaded for categories.");
    Ok(products)
  }

  /// Applies a partial update and returns the number of rows changed; a missing
  /// product yields `0`.
  #[instrument(name = "ProductService::update_product", skip(self), err(Display))]
  pub async fn update_product(&self, id: ProductId, patch: ProductPatch) -> ShopResult<u64> {
    if let Some(name) = &patch.name {
      if name.trim().is_empty() {
        return Err(ShopError::validation("Product name is required"));
      }
    }
    validate_amounts(patch.price.unwrap_or(0.0), patch.inventory.unwrap_or(0))?;

    if let Some(category_id) = patch.category_id {
      self.ensure_category_exists(category_id).await?;
    }

    let updated = self.repo.update_product(id, &patch).await?;
    if updated == 0 {
      warn!("No product matched the update.");
    }
    Ok(updated)
  }

  /// Returns the number of rows removed; deleting a missing product yields `0`.
  #[instrument(name = "ProductService::delete_product", skip(self), err(Display))]
  pub async fn delete_product(&self, id: ProductId) -> ShopResult<u64> {
    let deleted = self.repo.delete_product(id).await?;
    info!(deleted, "Product delete finished.");
    Ok(deleted)
  }

  async fn ensure_category_exists(&self, category_id: CategoryId) -> ShopResult<()> {
    match self.repo.find_category(category_id).await? {
      Some(_) => Ok(()),
      None => {
        warn!(category_id, "Referenced category does not exist.");
        Err(ShopError::category_missing(category_id))
      }
    }
  }
}

fn validate_amounts(price: f64, inventory: i64) -> ShopResult<()> {
  if !price.is_finite() || price < 0.0 {
    return Err(ShopError::validation("Product price cannot be negative"));
  }
  if inventory < 0 {
    return Err(ShopError::validation("Product inventory cannot be negative"));
  }
  Ok(())
}

fn parse_category_ids(raw: &str) -> ShopResult<Vec<CategoryId>> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .map(|part| {
      part
        .parse::<CategoryId>()
        .map_err(|_| ShopError::validation(format!("Invalid category id '{}'", part)))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn category_lists_are_split_on_commas() {
    assert_eq!(parse_category_ids("1,2").unwrap(), vec![1, 2]);
    assert_eq!(parse_category_ids(" 3 , 4 ,").unwrap(), vec![3, 4]);
  }

  #[test]
  fn junk_category_ids_are_rejected() {
    let err = parse_category_ids("1,abc").unwrap_err();
    assert_eq!(err.to_string(), "Invalid category id 'abc'");
  }

  #[test]
  fn negative_amounts_are_rejected() {
    assert!(validate_amounts(0.0, 0).is_ok());
    assert_eq!(
      validate_amounts(-1.0, 0).unwrap_err().to_string(),
      "Product price cannot be negative"
    );
    assert_eq!(
      validate_amounts(1.0, -5).unwrap_err().to_string(),
      "Product inventory cannot be negative"
    );
  }
}
