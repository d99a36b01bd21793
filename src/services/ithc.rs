//! ITHC service - compliance records of which software version a
//! project version was observed running
//!
//! Rows are unique per (project_id, software_id, project_version)
//! triple; both references must resolve before a write is accepted.

use chrono::Utc;
use sea_orm::{
  ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
  QuerySelect, Set,
};
use serde::Deserialize;

use crate::entities::prelude::*;
use crate::entities::{ithc_software, project, software};
use crate::error::{AppError, AppResult};
use crate::services::required;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct IthcPayload {
  pub project_id: Option<i32>,
  pub software_id: Option<i32>,
  pub project_version: Option<String>,
  pub current_software_version: Option<String>,
}

pub struct IthcService;

impl IthcService {
  pub async fn create(
    db: &DatabaseConnection,
    payload: IthcPayload,
  ) -> AppResult<IthcSoftwareModel> {
    let project_id =
      payload.project_id.ok_or_else(|| AppError::missing_field("project_id"))?;
    let software_id = payload
      .software_id
      .ok_or_else(|| AppError::missing_field("software_id"))?;
    let project_version = required(&payload.project_version, "project_version")?;
    let current_software_version = required(
      &payload.current_software_version,
      "current_software_version",
    )?;

    Self::check_refs(db, project_id, software_id).await?;

    if Self::find_by_triple(db, project_id, software_id, &project_version)
      .await?
      .is_some()
    {
      return Err(AppError::Duplicate("duplicate version entry".into()));
    }

    let now = Utc::now().naive_utc();
    let entry = IthcSoftwareActiveModel {
      project_id: Set(project_id),
      software_id: Set(software_id),
      project_version: Set(project_version),
      current_software_version: Set(current_software_version),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    };

    Ok(entry.insert(db).await?)
  }

  pub async fn get(
    db: &DatabaseConnection,
    id: i32,
  ) -> AppResult<IthcSoftwareModel> {
    IthcSoftware::find_by_id(id)
      .one(db)
      .await?
      .ok_or_else(|| AppError::not_found("ITHC entry", id))
  }

  pub async fn list(
    db: &DatabaseConnection,
    project_id: Option<i32>,
    project_version: Option<&str>,
  ) -> AppResult<Vec<IthcSoftwareModel>> {
    let mut query = IthcSoftware::find();
    if let Some(project_id) = project_id {
      query = query.filter(ithc_software::Column::ProjectId.eq(project_id));
    }
    if let Some(version) = project_version {
      query = query.filter(ithc_software::Column::ProjectVersion.eq(version));
    }
    Ok(query.all(db).await?)
  }

  /// Search by project and/or software name (case-insensitive substring).
  pub async fn search(
    db: &DatabaseConnection,
    project: Option<&str>,
    software: Option<&str>,
  ) -> AppResult<Vec<IthcSoftwareModel>> {
    let mut query = IthcSoftware::find();

    if let Some(project) = project {
      let ids: Vec<i32> = Project::find()
        .select_only()
        .column(project::Column::Id)
        .filter(project::Column::Name.contains(project))
        .into_tuple()
        .all(db)
        .await?;
      query = query.filter(ithc_software::Column::ProjectId.is_in(ids));
    }

    if let Some(software) = software {
      let ids: Vec<i32> = Software::find()
        .select_only()
        .column(software::Column::Id)
        .filter(software::Column::Name.contains(software))
        .into_tuple()
        .all(db)
        .await?;
      query = query.filter(ithc_software::Column::SoftwareId.is_in(ids));
    }

    Ok(query.all(db).await?)
  }

  pub async fn find_by_triple(
    db: &DatabaseConnection,
    project_id: i32,
    software_id: i32,
    project_version: &str,
  ) -> AppResult<Option<IthcSoftwareModel>> {
    let entry = IthcSoftware::find()
      .filter(ithc_software::Column::ProjectId.eq(project_id))
      .filter(ithc_software::Column::SoftwareId.eq(software_id))
      .filter(ithc_software::Column::ProjectVersion.eq(project_version))
      .one(db)
      .await?;
    Ok(entry)
  }

  async fn check_refs(
    db: &DatabaseConnection,
    project_id: i32,
    software_id: i32,
  ) -> AppResult<()> {
    if Project::find_by_id(project_id).one(db).await?.is_none() {
      return Err(AppError::Reference(format!(
        "reference not found: project {project_id}"
      )));
    }
    if Software::find_by_id(software_id).one(db).await?.is_none() {
      return Err(AppError::Reference(format!(
        "reference not found: software {software_id}"
      )));
    }
    Ok(())
  }

  /// Partial update; `updated_at` is touched on every call.
  pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: IthcPayload,
  ) -> AppResult<IthcSoftwareModel> {
    let entry = Self::get(db, id).await?;

    let project_id = payload.project_id.unwrap_or(entry.project_id);
    let software_id = payload.software_id.unwrap_or(entry.software_id);
    let project_version = match &payload.project_version {
      Some(v) if !v.trim().is_empty() => v.trim().to_string(),
      _ => entry.project_version.clone(),
    };

    Self::check_refs(db, project_id, software_id).await?;

    let triple_changed = project_id != entry.project_id
      || software_id != entry.software_id
      || project_version != entry.project_version;
    if triple_changed
      && Self::find_by_triple(db, project_id, software_id, &project_version)
        .await?
        .is_some()
    {
      return Err(AppError::Duplicate("duplicate version entry".into()));
    }

    let mut entry: IthcSoftwareActiveModel = entry.into();
    entry.project_id = Set(project_id);
    entry.software_id = Set(software_id);
    entry.project_version = Set(project_version);
    if let Some(current) = payload.current_software_version
      && !current.trim().is_empty()
    {
      entry.current_software_version = Set(current.trim().to_string());
    }
    entry.updated_at = Set(Utc::now().naive_utc());

    Ok(entry.update(db).await?)
  }

  pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let result = IthcSoftware::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
      return Err(AppError::not_found("ITHC entry", id));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::services::project::ProjectPayload;
  use crate::services::software::SoftwarePayload;
  use crate::services::test_db;
  use crate::services::{ProjectService, SoftwareService};

  async fn seed(db: &DatabaseConnection) -> (i32, i32) {
    let project = ProjectService::create(
      db,
      ProjectPayload { name: Some("P1".to_string()), ..Default::default() },
    )
    .await
    .unwrap();
    let software = SoftwareService::create(
      db,
      SoftwarePayload {
        name: Some("nginx".to_string()),
        software_type: Some("Server".to_string()),
        ..Default::default()
      },
    )
    .await
    .unwrap();
    (project.id, software.id)
  }

  fn payload(
    project_id: i32,
    software_id: i32,
    project_version: &str,
  ) -> IthcPayload {
    IthcPayload {
      project_id: Some(project_id),
      software_id: Some(software_id),
      project_version: Some(project_version.to_string()),
      current_software_version: Some("1.24".to_string()),
    }
  }

  #[tokio::test]
  async fn test_create_and_get() {
    let db = test_db().await;
    let (project_id, software_id) = seed(&db).await;

    let entry =
      IthcService::create(&db, payload(project_id, software_id, "2025.1"))
        .await
        .unwrap();

    let fetched = IthcService::get(&db, entry.id).await.unwrap();
    assert_eq!(fetched.project_version, "2025.1");
    assert_eq!(fetched.current_software_version, "1.24");
  }

  #[tokio::test]
  async fn test_duplicate_triple_rejected() {
    let db = test_db().await;
    let (project_id, software_id) = seed(&db).await;

    IthcService::create(&db, payload(project_id, software_id, "2025.1"))
      .await
      .unwrap();
    let result =
      IthcService::create(&db, payload(project_id, software_id, "2025.1"))
        .await;

    assert!(matches!(result, Err(AppError::Duplicate(_))));

    // A different project version is a distinct observation
    IthcService::create(&db, payload(project_id, software_id, "2025.2"))
      .await
      .unwrap();
  }

  #[tokio::test]
  async fn test_dangling_refs_rejected() {
    let db = test_db().await;
    let (project_id, software_id) = seed(&db).await;

    let result =
      IthcService::create(&db, payload(999, software_id, "2025.1")).await;
    assert!(matches!(result, Err(AppError::Reference(_))));

    let result =
      IthcService::create(&db, payload(project_id, 999, "2025.1")).await;
    assert!(matches!(result, Err(AppError::Reference(_))));

    assert!(IthcService::list(&db, None, None).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_update_touches_updated_at() {
    let db = test_db().await;
    let (project_id, software_id) = seed(&db).await;

    let entry =
      IthcService::create(&db, payload(project_id, software_id, "2025.1"))
        .await
        .unwrap();

    let updated = IthcService::update(
      &db,
      entry.id,
      IthcPayload {
        current_software_version: Some("1.26".to_string()),
        ..Default::default()
      },
    )
    .await
    .unwrap();

    assert_eq!(updated.current_software_version, "1.26");
    assert_eq!(updated.project_version, "2025.1");
    assert!(updated.updated_at >= entry.updated_at);
    assert_eq!(updated.created_at, entry.created_at);
  }

  #[tokio::test]
  async fn test_list_filters() {
    let db = test_db().await;
    let (project_id, software_id) = seed(&db).await;

    IthcService::create(&db, payload(project_id, software_id, "2025.1"))
      .await
      .unwrap();
    IthcService::create(&db, payload(project_id, software_id, "2025.2"))
      .await
      .unwrap();

    let all = IthcService::list(&db, Some(project_id), None).await.unwrap();
    assert_eq!(all.len(), 2);

    let one = IthcService::list(&db, Some(project_id), Some("2025.2"))
      .await
      .unwrap();
    assert_eq!(one.len(), 1);
  }

  #[tokio::test]
  async fn test_search_by_names() {
    let db = test_db().await;
    let (project_id, software_id) = seed(&db).await;

    IthcService::create(&db, payload(project_id, software_id, "2025.1"))
      .await
      .unwrap();

    let hits =
      IthcService::search(&db, Some("p1"), Some("NGINX")).await.unwrap();
    assert_eq!(hits.len(), 1);

    let misses = IthcService::search(&db, Some("other"), None).await.unwrap();
    assert!(misses.is_empty());
  }
}
