use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::entities::prelude::IthcSoftwareModel;
use crate::error::AppResult;
use crate::handlers::read_upload;
use crate::reconcile::{self, ImportSummary};
use crate::services::IthcService;
use crate::services::ithc::IthcPayload;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
  pub project_id: Option<i32>,
  pub project_version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NameSearchQuery {
  pub project: Option<String>,
  pub software: Option<String>,
}

pub async fn list(
  State(app): State<Arc<AppState>>,
  Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<IthcSoftwareModel>>> {
  let entries = IthcService::list(
    &app.db,
    query.project_id,
    query.project_version.as_deref(),
  )
  .await?;
  Ok(Json(entries))
}

pub async fn get(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> AppResult<Json<IthcSoftwareModel>> {
  Ok(Json(IthcService::get(&app.db, id).await?))
}

pub async fn search(
  State(app): State<Arc<AppState>>,
  Query(query): Query<NameSearchQuery>,
) -> AppResult<Json<Vec<IthcSoftwareModel>>> {
  let entries = IthcService::search(
    &app.db,
    query.project.as_deref(),
    query.software.as_deref(),
  )
  .await?;
  Ok(Json(entries))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  Json(payload): Json<IthcPayload>,
) -> AppResult<(StatusCode, Json<IthcSoftwareModel>)> {
  let entry = IthcService::create(&app.db, payload).await?;
  Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
  Json(payload): Json<IthcPayload>,
) -> AppResult<Json<IthcSoftwareModel>> {
  Ok(Json(IthcService::update(&app.db, id, payload).await?))
}

pub async fn delete(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> AppResult<Json<json::Value>> {
  IthcService::delete(&app.db, id).await?;
  Ok(Json(json::json!({ "message": "ITHC entry deleted" })))
}

pub async fn import(
  State(app): State<Arc<AppState>>,
  mut multipart: Multipart,
) -> AppResult<Json<ImportSummary>> {
  let bytes = read_upload(&mut multipart).await?;
  Ok(Json(reconcile::import_ithc(&app.db, &bytes).await?))
}
