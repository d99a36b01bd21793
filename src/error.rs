//! Error types for the inventory server

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  /// Missing or empty required field.
  #[error("{0}")]
  Validation(String),

  /// Uniqueness violation (software name, project name+version,
  /// ITHC triple, existing customer link).
  #[error("{0}")]
  Duplicate(String),

  #[error("{0}")]
  NotFound(String),

  /// Dangling project/software reference.
  #[error("{0}")]
  Reference(String),

  /// Unsupported upload extension or unparseable spreadsheet.
  #[error("{0}")]
  FileFormat(String),

  #[error("Database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn missing_field(field: &str) -> Self {
    Self::Validation(format!("missing field: {field}"))
  }

  pub fn not_found(kind: &str, id: i32) -> Self {
    Self::NotFound(format!("{kind} {id} not found"))
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = match &self {
      AppError::Validation(_)
      | AppError::Duplicate(_)
      | AppError::Reference(_)
      | AppError::FileFormat(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Database(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    let body = json::json!({ "error": self.to_string() });
    (status, Json(body)).into_response()
  }
}

pub type AppResult<T> = Result<T, AppError>;
