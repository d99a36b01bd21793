use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;

use crate::entities::prelude::{ProjectModel, ReleaseModel};
use crate::error::AppResult;
use crate::handlers::{SearchQuery, read_upload};
use crate::reconcile::{self, ImportSummary};
use crate::services::project::ProjectPayload;
use crate::services::release::ReleasePayload;
use crate::services::{ProjectService, ReleaseService};
use crate::state::AppState;

pub async fn list(
  State(app): State<Arc<AppState>>,
) -> AppResult<Json<Vec<ProjectModel>>> {
  Ok(Json(ProjectService::list(&app.db).await?))
}

pub async fn get(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> AppResult<Json<ProjectModel>> {
  Ok(Json(ProjectService::get(&app.db, id).await?))
}

pub async fn search(
  State(app): State<Arc<AppState>>,
  Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ProjectModel>>> {
  Ok(Json(ProjectService::search(&app.db, &query.q).await?))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  Json(payload): Json<ProjectPayload>,
) -> AppResult<(StatusCode, Json<ProjectModel>)> {
  let project = ProjectService::create(&app.db, payload).await?;
  Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
  Json(payload): Json<ProjectPayload>,
) -> AppResult<Json<ProjectModel>> {
  Ok(Json(ProjectService::update(&app.db, id, payload).await?))
}

pub async fn delete(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> AppResult<Json<json::Value>> {
  ProjectService::delete(&app.db, id).await?;
  Ok(Json(json::json!({ "message": "Project deleted" })))
}

pub async fn import(
  State(app): State<Arc<AppState>>,
  mut multipart: Multipart,
) -> AppResult<Json<ImportSummary>> {
  let bytes = read_upload(&mut multipart).await?;
  Ok(Json(reconcile::import_projects(&app.db, &bytes).await?))
}

pub async fn add_customer(
  State(app): State<Arc<AppState>>,
  Path((id, customer_id)): Path<(i32, i32)>,
) -> AppResult<(StatusCode, Json<json::Value>)> {
  ProjectService::add_customer(&app.db, id, customer_id).await?;
  Ok((
    StatusCode::CREATED,
    Json(json::json!({ "message": "Customer linked to project" })),
  ))
}

pub async fn remove_customer(
  State(app): State<Arc<AppState>>,
  Path((id, customer_id)): Path<(i32, i32)>,
) -> AppResult<Json<json::Value>> {
  ProjectService::remove_customer(&app.db, id, customer_id).await?;
  Ok(Json(json::json!({ "message": "Customer unlinked from project" })))
}

pub async fn create_release(
  State(app): State<Arc<AppState>>,
  Path(project_id): Path<i32>,
  Json(payload): Json<ReleasePayload>,
) -> AppResult<(StatusCode, Json<ReleaseModel>)> {
  let release = ReleaseService::create(&app.db, project_id, payload).await?;
  Ok((StatusCode::CREATED, Json(release)))
}

pub async fn delete_release(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> AppResult<Json<json::Value>> {
  ReleaseService::delete(&app.db, id).await?;
  Ok(Json(json::json!({ "message": "Release deleted" })))
}
