//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use pricewatch_core::{Classify, ErrorKind};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a store failure onto an HTTP-facing error by its [`ErrorKind`].
  ///
  /// Client-caused failures are logged at `warn`; everything else at `error`
  /// and reported as a 500.
  pub fn from_store<E>(e: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    match e.kind() {
      ErrorKind::UniqueViolation => {
        tracing::warn!(error = %e, "duplicate entry");
        Self::Conflict(e.to_string())
      }
      ErrorKind::ForeignKeyViolation => {
        tracing::warn!(error = %e, "referenced record not found");
        Self::BadRequest(e.to_string())
      }
      ErrorKind::NotFound => {
        tracing::warn!(error = %e, "nothing to act on");
        Self::NotFound(e.to_string())
      }
      ErrorKind::Invalid => {
        tracing::warn!(error = %e, "rejected input");
        Self::BadRequest(e.to_string())
      }
      ErrorKind::Other => {
        tracing::error!(error = %e, "store failure");
        Self::Store(Box::new(e))
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
