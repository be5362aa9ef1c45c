// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront::ShopError;
use thiserror::Error;

/// Errors returned by HTTP handlers.
///
/// Service failures keep their message unchanged; the variant only decides the status
/// code. Bodies are always `{"error": message}`.
#[derive(Debug, Error)]
pub enum AppError {
  /// The service refused the request (validation, missing reference, stock, store failure).
  #[error("{0}")]
  Rejected(ShopError),

  /// A listing failed for a reason other than bad input.
  #[error("{0}")]
  Failed(ShopError),

  #[error("{0}")]
  MissingResource(String),

  #[error("Configuration Error: {0}")]
  Config(String),
}

impl From<ShopError> for AppError {
  fn from(err: ShopError) -> Self {
    AppError::Rejected(err)
  }
}

impl AppError {
  /// Listing endpoints report bad query input as 400 and anything else as 500.
  pub fn from_listing(err: ShopError) -> Self {
    if err.is_client_error() {
      AppError::Rejected(err)
    } else {
      AppError::Failed(err)
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Rejected(_) => StatusCode::BAD_REQUEST,
      AppError::MissingResource(_) => StatusCode::NOT_FOUND,
      AppError::Failed(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Request rejected");
    }
    HttpResponse::build(status).json(json!({ "error": self.to_string() }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn listing_errors_split_on_caller_fault() {
    let bad_limit = AppError::from_listing(ShopError::validation("Invalid limit 'ten'"));
    assert_eq!(bad_limit.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(bad_limit.to_string(), "Invalid limit 'ten'");

    let missing = AppError::from_listing(ShopError::category_missing(4));
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

    let store_down = AppError::from_listing(ShopError::Persistence("Database error".to_string()));
    assert_eq!(store_down.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(store_down.to_string(), "Database error");
  }

  #[test]
  fn service_errors_on_other_routes_are_bad_requests() {
    let err: AppError = ShopError::Persistence("User not found".to_string()).into();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
      AppError::MissingResource("Product not found".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
  }
}
