// src/services/cart_service.rs

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{ShopError, ShopResult};
use crate::inventory::{check_availability, validate_quantity};
use crate::models::{Cart, CartId, CartItem, CartItemId, CartLine, CartSummary, ProductId};
use crate::store::Repository;

/// Cart and cart-item operations, with stock checks on every quantity change.
///
/// Checks read the product's current `inventory` and compare the absolute quantity
/// against it. Nothing is reserved and no transaction spans the read and the write.
#[derive(Clone)]
pub struct CartService {
  repo: Arc<dyn Repository>,
}

impl CartService {
  pub fn new(repo: Arc<dyn Repository>) -> Self {
    Self { repo }
  }

  #[instrument(name = "CartService::create_cart", skip(self), err(Display))]
  pub async fn create_cart(&self, user_id: &str) -> ShopResult<Cart> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
      warn!("Refusing to create a cart without a user id.");
      return Err(ShopError::validation("User ID is required"));
    }

    let cart = self.repo.create_cart(user_id).await?;
    info!(cart_id = cart.id, "Cart created.");
    Ok(cart)
  }

  #[instrument(name = "CartService::get_cart", skip(self), err(Display))]
  pub async fn get_cart(&self, cart_id: CartId) -> ShopResult<Cart> {
    self
      .repo
      .find_cart(cart_id)
      .await?
      .ok_or_else(|| ShopError::not_found("Cart not found"))
  }

  /// Adds `quantity` of a product to a cart.
  ///
  /// If the cart already holds the product, the stored quantity must itself still fit
  /// the product's inventory, and the item's quantity is then overwritten with
  /// `quantity`, not increased by it: adding 2 and then 9 leaves 9 in the cart. Nothing
  /// is written unless every check passes.
  #[instrument(name = "CartService::add_item_to_cart", skip(self), err(Display))]
  pub async fn add_item_to_cart(&self, cart_id: CartId, product_id: ProductId, quantity: i64) -> ShopResult<CartItem> {
    validate_quantity(quantity)?;

    let product = self
      .repo
      .find_product(product_id)
      .await?
      .ok_or_else(|| ShopError::not_found("Product not found"))?;

    if self.repo.find_cart(cart_id).await?.is_none() {
      return Err(ShopError::not_found("Cart not found"));
    }

    let existing = self.repo.find_cart_item_for_product(cart_id, product_id).await?;

    if let Some(item) = &existing {
      check_availability(product.inventory, item.quantity)?;
    }
    check_availability(product.inventory, quantity)?;

    let item = match existing {
      Some(item) => self
        .repo
        .update_cart_item_quantity(item.id, quantity)
        .await?
        .ok_or_else(|| ShopError::not_found("Cart item not found"))?,
      None => self.repo.create_cart_item(cart_id, product_id, quantity).await?,
    };

    info!(
      cart_item_id = item.id,
      quantity = item.quantity,
      inventory = product.inventory,
      "Cart item stored."
    );
    Ok(item)
  }

  /// Lists a cart's items with their products and totals.
  ///
  /// `None` is rejected before the repository is consulted.
  #[instrument(name = "CartService::get_cart_items", skip(self), err(Display))]
  pub async fn get_cart_items(&self, cart_id: Option<CartId>) -> ShopResult<CartSummary> {
    let cart_id = cart_id.ok_or_else(|| ShopError::validation("Cart ID is required"))?;

    let lines: Vec<CartLine> = self
      .repo
      .list_cart_items(cart_id)
      .await?
      .into_iter()
      .map(CartLine::from)
      .collect();

    let summary = CartSummary::from_lines(lines);
    info!(items = summary.items.len(), total = summary.total, "Cart items loaded.");
    Ok(summary)
  }

  #[instrument(name = "CartService::update_cart_item", skip(self), err(Display))]
  pub async fn update_cart_item(&self, item_id: CartItemId, quantity: i64) -> ShopResult<CartItem> {
    validate_quantity(quantity)?;

    let current = self
      .repo
      .find_cart_item(item_id)
      .await?
      .ok_or_else(|| ShopError::not_found("Cart item not found"))?;

    check_availability(current.product.inventory, quantity)?;

    let item = self
      .repo
      .update_cart_item_quantity(item_id, quantity)
      .await?
      .ok_or_else(|| ShopError::not_found("Cart item not found"))?;
    info!(cart_item_id = item.id, quantity = item.quantity, "Cart item quantity updated.");
    Ok(item)
  }

  #[instrument(name = "CartService::remove_cart_item", skip(self), err(Display))]
  pub async fn remove_cart_item(&self, item_id: CartItemId) -> ShopResult<()> {
    let removed = self.repo.delete_cart_item(item_id).await?;
    if removed == 0 {
      return Err(ShopError::not_found("Cart item not found"));
    }
    info!("Cart item removed.");
    Ok(())
  }
}
