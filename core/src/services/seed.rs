// src/services/seed.rs

use std::sync::Arc;
use tracing::info;

use super::{CategoryService, ProductService};
use crate::error::ShopResult;
use crate::models::{CategoryDraft, ProductDraft};
use crate::store::Repository;

const DEMO_CATALOG: &[(&str, &[(&str, f64, i64)])] = &[
  ("Laptops", &[("Ultrabook 13", 1299.0, 8), ("Workstation 16", 2499.0, 3)]),
  ("Accessories", &[("USB-C Hub", 49.5, 40), ("Wireless Mouse", 25.0, 120)]),
];

/// Fills an empty store with a small demo catalog. Returns how many products were
/// created; a store that already has categories is left alone.
pub async fn seed_demo_catalog(repo: Arc<dyn Repository>) -> ShopResult<usize> {
  let categories = CategoryService::new(repo.clone());
  if !categories.list_categories().await?.is_empty() {
    info!("Store already has categories; skipping demo seed.");
    return Ok(0);
  }

  let products = ProductService::new(repo);
  let mut created = 0;
  for (category_name, items) in DEMO_CATALOG {
    let category = categories
      .create_category(CategoryDraft {
        name: Some((*category_name).to_string()),
      })
      .await?;
    for (name, price, inventory) in items.iter() {
      products
        .create_product(
          ProductDraft::new(*name, category.id)
            .with_price(*price)
            .with_inventory(*inventory),
        )
        .await?;
      created += 1;
    }
  }

  info!(created, "Demo catalog seeded.");
  Ok(created)
}
