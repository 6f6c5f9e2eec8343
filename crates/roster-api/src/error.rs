//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Every variant renders as
/// `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("person {id} not found")]
  PersonNotFound { id: i64 },

  /// `PUT` addressed the id that marks unsaved records.
  #[error("id 0 is reserved for unsaved records")]
  ReservedId,

  #[error("missing query parameter: {0}")]
  MissingParameter(&'static str),

  #[error(transparent)]
  InvalidQuery(#[from] roster_core::Error),

  /// A body, path or query string axum could not extract.
  #[error("{message}")]
  Rejected { status: StatusCode, message: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::PersonNotFound { .. } => StatusCode::NOT_FOUND,
      ApiError::ReservedId
      | ApiError::MissingParameter(_)
      | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
      ApiError::Rejected { status, .. } => *status,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self {
    ApiError::Rejected { status: r.status(), message: r.body_text() }
  }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self {
    ApiError::Rejected { status: r.status(), message: r.body_text() }
  }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self {
    ApiError::Rejected { status: r.status(), message: r.body_text() }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = match &self {
      // Store detail stays in the log.
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        "internal server error".to_owned()
      }
      other => other.to_string(),
    };
    (self.status(), axum::Json(json!({ "error": message }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use serde_json::Value;

  async fn body_of(err: ApiError) -> (StatusCode, Value) {
    let resp   = err.into_response();
    let status = resp.status();
    let bytes  = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn store_failure_hides_detail() {
    let cause = std::io::Error::other("database or disk is full");
    let (status, body) = body_of(ApiError::Store(Box::new(cause))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "internal server error" }));
  }

  #[tokio::test]
  async fn client_errors_carry_their_message() {
    let (status, body) = body_of(ApiError::PersonNotFound { id: 4 }).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "person 4 not found");

    let (status, body) = body_of(ApiError::MissingParameter("name")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing query parameter: name");

    let bad_sort = roster_core::Error::UnknownSortProperty("email".into());
    let message  = bad_sort.to_string();
    let (status, body) = body_of(bad_sort.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], message.as_str());
  }
}
