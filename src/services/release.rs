//! Release service - versioned releases owned by a project

use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;

use crate::entities::prelude::*;
use crate::error::{AppError, AppResult};
use crate::services::{none_if_blank, required};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ReleasePayload {
  pub version: Option<String>,
  pub release_date: Option<NaiveDateTime>,
  pub notes: Option<String>,
}

pub struct ReleaseService;

impl ReleaseService {
  /// Create a release under a project. The release date defaults to now
  /// when the payload omits it.
  pub async fn create(
    db: &DatabaseConnection,
    project_id: i32,
    payload: ReleasePayload,
  ) -> AppResult<ReleaseModel> {
    let version = required(&payload.version, "version")?;

    if Project::find_by_id(project_id).one(db).await?.is_none() {
      return Err(AppError::not_found("Project", project_id));
    }

    let release = ReleaseActiveModel {
      version: Set(version),
      release_date: Set(
        payload.release_date.unwrap_or_else(|| Utc::now().naive_utc()),
      ),
      notes: Set(none_if_blank(payload.notes)),
      project_id: Set(project_id),
      ..Default::default()
    };

    Ok(release.insert(db).await?)
  }

  pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let result = Release::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
      return Err(AppError::not_found("Release", id));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::services::ProjectService;
  use crate::services::project::ProjectPayload;
  use crate::services::test_db;

  #[tokio::test]
  async fn test_create_under_project() {
    let db = test_db().await;

    let project = ProjectService::create(
      &db,
      ProjectPayload { name: Some("P1".to_string()), ..Default::default() },
    )
    .await
    .unwrap();

    let release = ReleaseService::create(
      &db,
      project.id,
      ReleasePayload {
        version: Some("1.2.0".to_string()),
        notes: Some("first".to_string()),
        release_date: None,
      },
    )
    .await
    .unwrap();

    assert_eq!(release.project_id, project.id);
    assert_eq!(release.version, "1.2.0");
  }

  #[tokio::test]
  async fn test_create_under_missing_project() {
    let db = test_db().await;

    let result = ReleaseService::create(
      &db,
      7,
      ReleasePayload { version: Some("1.0".to_string()), ..Default::default() },
    )
    .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
  }

  #[tokio::test]
  async fn test_delete_missing_id() {
    let db = test_db().await;

    let result = ReleaseService::delete(&db, 3).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
  }
}
