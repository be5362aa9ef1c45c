// src/error.rs
use thiserror::Error;

/// Every failure a service or repository can surface.
///
/// `Display` renders exactly the user-facing message; the HTTP layer copies it into
/// `{"error": ...}` bodies unchanged.
#[derive(Debug, Error)]
pub enum ShopError {
  /// A required field is missing or a value is malformed.
  #[error("{0}")]
  Validation(String),

  /// A referenced entity does not exist.
  #[error("{0}")]
  NotFound(String),

  #[error("Not enough inventory available")]
  InsufficientInventory { requested: i64, available: i64 },

  /// Opaque failure reported by a non-SQL repository.
  #[error("{0}")]
  Persistence(String),

  #[error(transparent)]
  Database(#[from] sqlx::Error),
}

impl ShopError {
  pub fn validation(message: impl Into<String>) -> Self {
    ShopError::Validation(message.into())
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    ShopError::NotFound(message.into())
  }

  pub fn category_missing(id: i64) -> Self {
    ShopError::NotFound(format!("Category with id {} does not exist", id))
  }

  /// True for failures caused by the caller's input rather than the store.
  pub fn is_client_error(&self) -> bool {
    matches!(
      self,
      ShopError::Validation(_) | ShopError::NotFound(_) | ShopError::InsufficientInventory { .. }
    )
  }
}

pub type ShopResult<T, E = ShopError> = std::result::Result<T, E>;
