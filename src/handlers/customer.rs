use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;

use crate::entities::prelude::CustomerModel;
use crate::error::AppResult;
use crate::handlers::{SearchQuery, read_upload};
use crate::reconcile::{self, ImportSummary};
use crate::services::CustomerService;
use crate::services::customer::CustomerPayload;
use crate::state::AppState;

pub async fn list(
  State(app): State<Arc<AppState>>,
) -> AppResult<Json<Vec<CustomerModel>>> {
  Ok(Json(CustomerService::list(&app.db).await?))
}

pub async fn get(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> AppResult<Json<CustomerModel>> {
  Ok(Json(CustomerService::get(&app.db, id).await?))
}

pub async fn search(
  State(app): State<Arc<AppState>>,
  Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<CustomerModel>>> {
  Ok(Json(CustomerService::search(&app.db, &query.q).await?))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  Json(payload): Json<CustomerPayload>,
) -> AppResult<(StatusCode, Json<CustomerModel>)> {
  let customer = CustomerService::create(&app.db, payload).await?;
  Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
  Json(payload): Json<CustomerPayload>,
) -> AppResult<Json<CustomerModel>> {
  Ok(Json(CustomerService::update(&app.db, id, payload).await?))
}

pub async fn delete(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> AppResult<Json<json::Value>> {
  CustomerService::delete(&app.db, id).await?;
  Ok(Json(json::json!({ "message": "Customer deleted" })))
}

pub async fn import(
  State(app): State<Arc<AppState>>,
  mut multipart: Multipart,
) -> AppResult<Json<ImportSummary>> {
  let bytes = read_upload(&mut multipart).await?;
  Ok(Json(reconcile::import_customers(&app.db, &bytes).await?))
}
