// src/inventory.rs

//! Stock admissibility rules.
//!
//! Quantities are always compared, as absolute values, against the product's current
//! `inventory`. Nothing is reserved: two carts holding the same product are each
//! checked against the full stock.

use crate::error::{ShopError, ShopResult};
use tracing::debug;

/// Fails with `InsufficientInventory` when `requested_quantity` exceeds `product_inventory`.
/// Equality is admissible.
pub fn check_availability(product_inventory: i64, requested_quantity: i64) -> ShopResult<()> {
  if requested_quantity > product_inventory {
    debug!(
      available = product_inventory,
      requested = requested_quantity,
      "Inventory check rejected quantity."
    );
    return Err(ShopError::InsufficientInventory {
      requested: requested_quantity,
      available: product_inventory,
    });
  }
  Ok(())
}

/// Cart quantities must be positive.
pub fn validate_quantity(quantity: i64) -> ShopResult<()> {
  if quantity <= 0 {
    return Err(ShopError::validation("Quantity must be a positive integer"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn equal_quantity_is_admissible() {
    assert!(check_availability(10, 10).is_ok());
    assert!(check_availability(10, 1).is_ok());
  }

  #[test]
  fn quantity_above_inventory_is_rejected() {
    let err = check_availability(10, 11).unwrap_err();
    assert_eq!(err.to_string(), "Not enough inventory available");
    match err {
      ShopError::InsufficientInventory { requested, available } => {
        assert_eq!(requested, 11);
        assert_eq!(available, 10);
      }
      other => panic!("Expected InsufficientInventory, got {:?}", other),
    }
  }

  #[test]
  fn empty_stock_rejects_everything_positive() {
    assert!(check_availability(0, 1).is_err());
    assert!(check_availability(0, 0).is_ok());
  }

  #[test]
  fn non_positive_quantities_fail_validation() {
    for quantity in [0, -1, -200] {
      let err = validate_quantity(quantity).unwrap_err();
      assert!(matches!(err, ShopError::Validation(_)));
      assert_eq!(err.to_string(), "Quantity must be a positive integer");
    }
    assert!(validate_quantity(1).is_ok());
  }
}
