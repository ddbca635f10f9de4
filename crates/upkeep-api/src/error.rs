//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use upkeep_core::store::StoreFailure;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The request was well-formed but violates a domain rule (422).
  #[error("validation failed: {0}")]
  Validation(String),

  /// The upstream backend answered with this status; it is forwarded as-is.
  #[error("upstream responded {status}: {message}")]
  Upstream { status: u16, message: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store failure: upstream-originated statuses are forwarded,
  /// anything else is an internal error.
  pub fn from_store<E>(e: E) -> Self
  where
    E: StoreFailure + Send + Sync + 'static,
  {
    match e.upstream_status() {
      Some(status) => ApiError::Upstream { status, message: e.to_string() },
      None => ApiError::Store(Box::new(e)),
    }
  }
}

/// Core contract violations (malformed recurrence inputs) surface as 422.
impl From<upkeep_core::Error> for ApiError {
  fn from(e: upkeep_core::Error) -> Self {
    ApiError::Validation(e.to_string())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Validation(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Upstream { status, message } => (
        StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
        message.clone(),
      ),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
