use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;

use crate::entities::prelude::SoftwareModel;
use crate::error::AppResult;
use crate::handlers::{SearchQuery, read_upload};
use crate::reconcile::{self, ImportSummary};
use crate::services::SoftwareService;
use crate::services::software::SoftwarePayload;
use crate::state::AppState;

pub async fn list(
  State(app): State<Arc<AppState>>,
) -> AppResult<Json<Vec<SoftwareModel>>> {
  Ok(Json(SoftwareService::list(&app.db).await?))
}

pub async fn get(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> AppResult<Json<SoftwareModel>> {
  Ok(Json(SoftwareService::get(&app.db, id).await?))
}

pub async fn search(
  State(app): State<Arc<AppState>>,
  Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<SoftwareModel>>> {
  Ok(Json(SoftwareService::search(&app.db, &query.q).await?))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  Json(payload): Json<SoftwarePayload>,
) -> AppResult<(StatusCode, Json<SoftwareModel>)> {
  let software = SoftwareService::create(&app.db, payload).await?;
  Ok((StatusCode::CREATED, Json(software)))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
  Json(payload): Json<SoftwarePayload>,
) -> AppResult<Json<SoftwareModel>> {
  Ok(Json(SoftwareService::update(&app.db, id, payload).await?))
}

pub async fn delete(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> AppResult<Json<json::Value>> {
  SoftwareService::delete(&app.db, id).await?;
  Ok(Json(json::json!({ "message": "Software deleted" })))
}

pub async fn import(
  State(app): State<Arc<AppState>>,
  mut multipart: Multipart,
) -> AppResult<Json<ImportSummary>> {
  let bytes = read_upload(&mut multipart).await?;
  Ok(Json(reconcile::import_software(&app.db, &bytes).await?))
}
