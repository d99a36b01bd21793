use axum::extract::Path;
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::{AppError, AppResult};
use crate::reconcile::{self, TemplateKind};

const XLSX_CONTENT_TYPE: &str =
  "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Downloadable blank import template for a given entity kind.
pub async fn download(
  Path(template_type): Path<String>,
) -> AppResult<impl IntoResponse> {
  let kind = TemplateKind::parse(&template_type).ok_or_else(|| {
    AppError::Validation(format!("unknown template type: {template_type}"))
  })?;

  let bytes = reconcile::template(kind)?;

  let headers = [
    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
    (
      header::CONTENT_DISPOSITION,
      format!("attachment; filename=\"{}\"", kind.file_name()),
    ),
  ];

  Ok((headers, bytes))
}
