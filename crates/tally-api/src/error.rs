//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The backing store could not be read. Always a 503, never an empty
  /// result.
  #[error("store unavailable: {0}")]
  Unavailable(#[source] tally_core::Error),
}

impl From<tally_core::Error> for ApiError {
  fn from(e: tally_core::Error) -> Self {
    match e {
      tally_core::Error::Store { .. } => ApiError::Unavailable(e),
      other => ApiError::BadRequest(other.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unavailable(e) => {
        tracing::error!(error = %e, "store unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
