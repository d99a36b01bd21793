//! Software service - tracked software products and their latest versions

use chrono::Utc;
use sea_orm::{
  ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
  Set,
};
use serde::Deserialize;

use crate::entities::prelude::*;
use crate::entities::software;
use crate::error::{AppError, AppResult};
use crate::services::{none_if_blank, required};

/// Create/update payload. Create requires `name` and `software_type`;
/// update applies only the fields that are present.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SoftwarePayload {
  pub name: Option<String>,
  pub software_type: Option<String>,
  pub latest_version: Option<String>,
  pub check_url: Option<String>,
}

pub struct SoftwareService;

impl SoftwareService {
  /// Create a new software record. Names are unique (exact,
  /// case-sensitive match).
  pub async fn create(
    db: &DatabaseConnection,
    payload: SoftwarePayload,
  ) -> AppResult<SoftwareModel> {
    let name = required(&payload.name, "name")?;
    let software_type = required(&payload.software_type, "software_type")?;

    if Self::find_by_name(db, &name).await?.is_some() {
      return Err(AppError::Duplicate(
        "Software with this name already exists".into(),
      ));
    }

    let software = SoftwareActiveModel {
      name: Set(name),
      software_type: Set(software_type),
      latest_version: Set(none_if_blank(payload.latest_version)),
      last_updated: Set(Utc::now().naive_utc()),
      check_url: Set(none_if_blank(payload.check_url)),
      ..Default::default()
    };

    Ok(software.insert(db).await?)
  }

  pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<SoftwareModel> {
    Software::find_by_id(id)
      .one(db)
      .await?
      .ok_or_else(|| AppError::not_found("Software", id))
  }

  pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<SoftwareModel>> {
    Ok(Software::find().all(db).await?)
  }

  /// Case-insensitive substring match on name.
  pub async fn search(
    db: &DatabaseConnection,
    query: &str,
  ) -> AppResult<Vec<SoftwareModel>> {
    let results = Software::find()
      .filter(software::Column::Name.contains(query))
      .all(db)
      .await?;
    Ok(results)
  }

  /// Exact-name lookup, used by the duplicate check and the reconciler.
  pub async fn find_by_name(
    db: &DatabaseConnection,
    name: &str,
  ) -> AppResult<Option<SoftwareModel>> {
    let software = Software::find()
      .filter(software::Column::Name.eq(name))
      .one(db)
      .await?;
    Ok(software)
  }

  /// Partial update: absent fields are left untouched. Always re-stamps
  /// `last_updated`.
  pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: SoftwarePayload,
  ) -> AppResult<SoftwareModel> {
    let software = Self::get(db, id).await?;

    if let Some(name) = &payload.name
      && !name.trim().is_empty()
      && name.trim() != software.name
      && Self::find_by_name(db, name.trim()).await?.is_some()
    {
      return Err(AppError::Duplicate(
        "Software with this name already exists".into(),
      ));
    }

    let mut software: SoftwareActiveModel = software.into();
    if let Some(name) = payload.name
      && !name.trim().is_empty()
    {
      software.name = Set(name.trim().to_string());
    }
    if let Some(software_type) = payload.software_type
      && !software_type.trim().is_empty()
    {
      software.software_type = Set(software_type.trim().to_string());
    }
    if payload.latest_version.is_some() {
      software.latest_version = Set(none_if_blank(payload.latest_version));
    }
    if payload.check_url.is_some() {
      software.check_url = Set(none_if_blank(payload.check_url));
    }
    software.last_updated = Set(Utc::now().naive_utc());

    Ok(software.update(db).await?)
  }

  /// Delete by id. ITHC rows for this software go with it and any
  /// project link is cleared, mirroring the schema's FK actions.
  pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    use sea_orm::TransactionTrait;

    use crate::entities::{ithc_software, project};

    Self::get(db, id).await?;

    let txn = db.begin().await?;

    IthcSoftware::delete_many()
      .filter(ithc_software::Column::SoftwareId.eq(id))
      .exec(&txn)
      .await?;

    let linked = Project::find()
      .filter(project::Column::SoftwareId.eq(id))
      .all(&txn)
      .await?;
    for linked in linked {
      let mut linked: ProjectActiveModel = linked.into();
      linked.software_id = Set(None);
      linked.update(&txn).await?;
    }

    Software::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::services::test_db;

  fn payload(name: &str) -> SoftwarePayload {
    SoftwarePayload {
      name: Some(name.to_string()),
      software_type: Some("Application".to_string()),
      latest_version: Some("1.0.0".to_string()),
      check_url: Some("http://example.com".to_string()),
    }
  }

  #[tokio::test]
  async fn test_create_and_get() {
    let db = test_db().await;

    let created =
      SoftwareService::create(&db, payload("nginx")).await.unwrap();
    let fetched = SoftwareService::get(&db, created.id).await.unwrap();

    assert_eq!(fetched.name, "nginx");
    assert_eq!(fetched.software_type, "Application");
    assert_eq!(fetched.latest_version.as_deref(), Some("1.0.0"));
    assert_eq!(fetched.check_url.as_deref(), Some("http://example.com"));
  }

  #[tokio::test]
  async fn test_missing_required_field() {
    let db = test_db().await;

    let result = SoftwareService::create(
      &db,
      SoftwarePayload {
        name: Some(String::new()),
        software_type: Some("Application".to_string()),
        ..Default::default()
      },
    )
    .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
  }

  #[tokio::test]
  async fn test_duplicate_name_rejected() {
    let db = test_db().await;

    SoftwareService::create(&db, payload("nginx")).await.unwrap();
    let result = SoftwareService::create(&db, payload("nginx")).await;

    assert!(matches!(result, Err(AppError::Duplicate(_))));
    assert_eq!(SoftwareService::list(&db).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_duplicate_check_is_case_sensitive() {
    let db = test_db().await;

    SoftwareService::create(&db, payload("nginx")).await.unwrap();
    SoftwareService::create(&db, payload("NGINX")).await.unwrap();

    assert_eq!(SoftwareService::list(&db).await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn test_partial_update() {
    let db = test_db().await;

    let created =
      SoftwareService::create(&db, payload("nginx")).await.unwrap();

    let updated = SoftwareService::update(
      &db,
      created.id,
      SoftwarePayload {
        latest_version: Some("2.0.0".to_string()),
        ..Default::default()
      },
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "nginx");
    assert_eq!(updated.check_url.as_deref(), Some("http://example.com"));
    assert_eq!(updated.latest_version.as_deref(), Some("2.0.0"));
    assert!(updated.last_updated >= created.last_updated);
  }

  #[tokio::test]
  async fn test_search_case_insensitive() {
    let db = test_db().await;

    SoftwareService::create(&db, payload("PostgreSQL")).await.unwrap();

    let found = SoftwareService::search(&db, "postgres").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "PostgreSQL");
  }

  #[tokio::test]
  async fn test_delete_missing_id() {
    let db = test_db().await;

    let result = SoftwareService::delete(&db, 999).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
  }
}
