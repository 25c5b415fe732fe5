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
  #[error("not authenticated")]
  Unauthenticated,

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("invalid payload: {0}")]
  InvalidPayload(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<quorum_core::Error> for ApiError {
  fn from(e: quorum_core::Error) -> Self {
    use quorum_core::Error as E;
    match e {
      E::Unauthenticated => ApiError::Unauthenticated,
      E::CredentialsRejected(_) => ApiError::Unauthenticated,
      E::UnauthorizedEmail { .. } | E::Forbidden { .. } => {
        ApiError::Forbidden(e.to_string())
      }
      E::InvalidPayload(msg) => ApiError::InvalidPayload(msg),
      E::NotFound { .. } => ApiError::NotFound(e.to_string()),
      E::Store(inner) => ApiError::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthenticated => {
        (StatusCode::UNAUTHORIZED, self.to_string())
      }
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
      ApiError::InvalidPayload(m) => {
        (StatusCode::UNPROCESSABLE_ENTITY, m.clone())
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
