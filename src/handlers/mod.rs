//! HTTP handlers, one module per resource

pub mod customer;
pub mod ithc;
pub mod project;
pub mod software;
pub mod templates;

use axum::extract::Multipart;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
  #[serde(default)]
  pub q: String,
}

/// Pull the uploaded spreadsheet out of a multipart body (field name
/// `file`, `.xlsx`/`.xls` only) as an in-memory buffer.
pub(crate) async fn read_upload(
  multipart: &mut Multipart,
) -> AppResult<Vec<u8>> {
  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|err| AppError::FileFormat(err.to_string()))?
  {
    if field.name() != Some("file") {
      continue;
    }

    let file_name =
      field.file_name().unwrap_or_default().to_ascii_lowercase();
    if !(file_name.ends_with(".xlsx") || file_name.ends_with(".xls")) {
      return Err(AppError::FileFormat(
        "only .xlsx and .xls files are supported".into(),
      ));
    }

    let bytes = field
      .bytes()
      .await
      .map_err(|err| AppError::FileFormat(err.to_string()))?;
    return Ok(bytes.to_vec());
  }

  Err(AppError::missing_field("file"))
}

pub async fn health() -> &'static str {
  "OK"
}
