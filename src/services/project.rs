//! Project service - projects, their software pins and customer links
//!
//! Uniqueness policy: a project is unique per (name, software_version)
//! pair, so the same name may recur against different pinned versions.

use chrono::Utc;
use sea_orm::{
  ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
  Set, TransactionTrait,
};
use serde::Deserialize;

use crate::entities::prelude::*;
use crate::entities::{ithc_software, project, project_customer, release};
use crate::error::{AppError, AppResult};
use crate::services::{none_if_blank, required};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProjectPayload {
  pub name: Option<String>,
  pub description: Option<String>,
  pub software_id: Option<i32>,
  pub software_version: Option<String>,
}

pub struct ProjectService;

impl ProjectService {
  pub async fn create(
    db: &DatabaseConnection,
    payload: ProjectPayload,
  ) -> AppResult<ProjectModel> {
    let name = required(&payload.name, "name")?;
    let software_version = none_if_blank(payload.software_version);

    if Self::find_by_name_and_version(db, &name, software_version.as_deref())
      .await?
      .is_some()
    {
      return Err(AppError::Duplicate(
        "Project with this name and version already exists".into(),
      ));
    }

    if let Some(software_id) = payload.software_id {
      Self::check_software_ref(db, software_id).await?;
    }

    let project = ProjectActiveModel {
      name: Set(name),
      description: Set(none_if_blank(payload.description)),
      created_at: Set(Utc::now().naive_utc()),
      software_id: Set(payload.software_id),
      software_version: Set(software_version),
      ..Default::default()
    };

    Ok(project.insert(db).await?)
  }

  pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<ProjectModel> {
    Project::find_by_id(id)
      .one(db)
      .await?
      .ok_or_else(|| AppError::not_found("Project", id))
  }

  pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<ProjectModel>> {
    Ok(Project::find().all(db).await?)
  }

  pub async fn search(
    db: &DatabaseConnection,
    query: &str,
  ) -> AppResult<Vec<ProjectModel>> {
    let results = Project::find()
      .filter(project::Column::Name.contains(query))
      .all(db)
      .await?;
    Ok(results)
  }

  /// Exact-name lookup (first match), used by the reconciler.
  pub async fn find_by_name(
    db: &DatabaseConnection,
    name: &str,
  ) -> AppResult<Option<ProjectModel>> {
    let project = Project::find()
      .filter(project::Column::Name.eq(name))
      .one(db)
      .await?;
    Ok(project)
  }

  async fn find_by_name_and_version(
    db: &DatabaseConnection,
    name: &str,
    version: Option<&str>,
  ) -> AppResult<Option<ProjectModel>> {
    let mut query = Project::find().filter(project::Column::Name.eq(name));
    query = match version {
      Some(v) => query.filter(project::Column::SoftwareVersion.eq(v)),
      None => query.filter(project::Column::SoftwareVersion.is_null()),
    };
    Ok(query.one(db).await?)
  }

  async fn check_software_ref(
    db: &DatabaseConnection,
    software_id: i32,
  ) -> AppResult<()> {
    if Software::find_by_id(software_id).one(db).await?.is_none() {
      return Err(AppError::Reference(format!(
        "reference not found: software {software_id}"
      )));
    }
    Ok(())
  }

  /// Partial update. `created_at` is immutable.
  pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: ProjectPayload,
  ) -> AppResult<ProjectModel> {
    let project = Self::get(db, id).await?;

    let new_name = match &payload.name {
      Some(name) if !name.trim().is_empty() => name.trim().to_string(),
      _ => project.name.clone(),
    };
    let new_version = match &payload.software_version {
      Some(_) => none_if_blank(payload.software_version.clone()),
      None => project.software_version.clone(),
    };

    let pair_changed = new_name != project.name
      || new_version != project.software_version;
    if pair_changed
      && Self::find_by_name_and_version(db, &new_name, new_version.as_deref())
        .await?
        .is_some()
    {
      return Err(AppError::Duplicate(
        "Project with this name and version already exists".into(),
      ));
    }

    if let Some(software_id) = payload.software_id {
      Self::check_software_ref(db, software_id).await?;
    }

    let mut project: ProjectActiveModel = project.into();
    project.name = Set(new_name);
    project.software_version = Set(new_version);
    if payload.description.is_some() {
      project.description = Set(none_if_blank(payload.description));
    }
    if payload.software_id.is_some() {
      project.software_id = Set(payload.software_id);
    }

    Ok(project.update(db).await?)
  }

  /// Delete by id, cascading releases, ITHC rows and customer links.
  pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    Self::get(db, id).await?;

    let txn = db.begin().await?;

    Release::delete_many()
      .filter(release::Column::ProjectId.eq(id))
      .exec(&txn)
      .await?;
    IthcSoftware::delete_many()
      .filter(ithc_software::Column::ProjectId.eq(id))
      .exec(&txn)
      .await?;
    ProjectCustomer::delete_many()
      .filter(project_customer::Column::ProjectId.eq(id))
      .exec(&txn)
      .await?;
    Project::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
  }

  pub async fn add_customer(
    db: &DatabaseConnection,
    project_id: i32,
    customer_id: i32,
  ) -> AppResult<()> {
    Self::get(db, project_id).await?;
    if Customer::find_by_id(customer_id).one(db).await?.is_none() {
      return Err(AppError::not_found("Customer", customer_id));
    }

    let existing =
      ProjectCustomer::find_by_id((project_id, customer_id)).one(db).await?;
    if existing.is_some() {
      return Err(AppError::Duplicate(
        "Customer already linked to this project".into(),
      ));
    }

    let link = ProjectCustomerActiveModel {
      project_id: Set(project_id),
      customer_id: Set(customer_id),
    };
    link.insert(db).await?;
    Ok(())
  }

  pub async fn remove_customer(
    db: &DatabaseConnection,
    project_id: i32,
    customer_id: i32,
  ) -> AppResult<()> {
    let result = ProjectCustomer::delete_by_id((project_id, customer_id))
      .exec(db)
      .await?;
    if result.rows_affected == 0 {
      return Err(AppError::NotFound(format!(
        "Customer {customer_id} is not linked to project {project_id}"
      )));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::services::test_db;
  use crate::services::customer::CustomerPayload;
  use crate::services::release::ReleasePayload;
  use crate::services::{CustomerService, ReleaseService};

  fn payload(name: &str, version: Option<&str>) -> ProjectPayload {
    ProjectPayload {
      name: Some(name.to_string()),
      description: Some("desc".to_string()),
      software_id: None,
      software_version: version.map(str::to_string),
    }
  }

  #[tokio::test]
  async fn test_name_and_version_uniqueness() {
    let db = test_db().await;

    ProjectService::create(&db, payload("P1", Some("1.0"))).await.unwrap();

    // Same name with a different version is allowed
    ProjectService::create(&db, payload("P1", Some("2.0"))).await.unwrap();

    let result = ProjectService::create(&db, payload("P1", Some("1.0"))).await;
    match result {
      Err(AppError::Duplicate(msg)) => {
        assert_eq!(msg, "Project with this name and version already exists");
      }
      other => panic!("expected duplicate, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn test_versionless_uniqueness() {
    let db = test_db().await;

    ProjectService::create(&db, payload("P1", None)).await.unwrap();
    let result = ProjectService::create(&db, payload("P1", None)).await;
    assert!(matches!(result, Err(AppError::Duplicate(_))));
  }

  #[tokio::test]
  async fn test_dangling_software_ref_rejected() {
    let db = test_db().await;

    let result = ProjectService::create(
      &db,
      ProjectPayload {
        name: Some("P1".to_string()),
        software_id: Some(42),
        ..Default::default()
      },
    )
    .await;

    assert!(matches!(result, Err(AppError::Reference(_))));
  }

  #[tokio::test]
  async fn test_search_case_insensitive() {
    let db = test_db().await;

    ProjectService::create(&db, payload("Unique Test Project", None))
      .await
      .unwrap();

    let found = ProjectService::search(&db, "unique").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Unique Test Project");
  }

  #[tokio::test]
  async fn test_delete_cascades_dependents() {
    let db = test_db().await;

    let project =
      ProjectService::create(&db, payload("P1", None)).await.unwrap();
    ReleaseService::create(
      &db,
      project.id,
      ReleasePayload { version: Some("1.0".to_string()), ..Default::default() },
    )
    .await
    .unwrap();

    let customer = CustomerService::create(
      &db,
      CustomerPayload { name: Some("Acme".to_string()), ..Default::default() },
    )
    .await
    .unwrap();
    ProjectService::add_customer(&db, project.id, customer.id).await.unwrap();

    ProjectService::delete(&db, project.id).await.unwrap();

    let releases = Release::find().all(&db).await.unwrap();
    assert!(releases.is_empty());
    let links = ProjectCustomer::find().all(&db).await.unwrap();
    assert!(links.is_empty());
    // The customer itself survives
    assert_eq!(CustomerService::list(&db).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_customer_link_roundtrip() {
    let db = test_db().await;

    let project =
      ProjectService::create(&db, payload("P1", None)).await.unwrap();
    let customer = CustomerService::create(
      &db,
      CustomerPayload { name: Some("Acme".to_string()), ..Default::default() },
    )
    .await
    .unwrap();

    ProjectService::add_customer(&db, project.id, customer.id).await.unwrap();

    let dup = ProjectService::add_customer(&db, project.id, customer.id).await;
    assert!(matches!(dup, Err(AppError::Duplicate(_))));

    ProjectService::remove_customer(&db, project.id, customer.id)
      .await
      .unwrap();
    let missing =
      ProjectService::remove_customer(&db, project.id, customer.id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
  }

  #[tokio::test]
  async fn test_update_does_not_touch_created_at() {
    let db = test_db().await;

    let project =
      ProjectService::create(&db, payload("P1", None)).await.unwrap();
    let updated = ProjectService::update(
      &db,
      project.id,
      ProjectPayload {
        description: Some("new description".to_string()),
        ..Default::default()
      },
    )
    .await
    .unwrap();

    assert_eq!(updated.created_at, project.created_at);
    assert_eq!(updated.description.as_deref(), Some("new description"));
    assert_eq!(updated.name, "P1");
  }
}
