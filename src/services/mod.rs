//! Business logic services: validation, uniqueness and CRUD per entity

pub mod customer;
pub mod ithc;
pub mod project;
pub mod release;
pub mod software;

pub use customer::CustomerService;
pub use ithc::IthcService;
pub use project::ProjectService;
pub use release::ReleaseService;
pub use software::SoftwareService;

use crate::error::{AppError, AppResult};

/// Extract a required field, rejecting absent or blank values.
pub(crate) fn required(
  value: &Option<String>,
  field: &str,
) -> AppResult<String> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
    _ => Err(AppError::missing_field(field)),
  }
}

/// Normalize an optional field: blank strings become `None`.
pub(crate) fn none_if_blank(value: Option<String>) -> Option<String> {
  value.and_then(|v| {
    let v = v.trim().to_string();
    if v.is_empty() { None } else { Some(v) }
  })
}

/// In-memory SQLite with every entity table, for service and
/// reconciler tests.
#[cfg(test)]
pub(crate) async fn test_db() -> sea_orm::DatabaseConnection {
  use sea_orm::{ConnectionTrait, Database, Schema};

  let db = Database::connect("sqlite::memory:").await.unwrap();
  let schema = Schema::new(db.get_database_backend());

  let stmt = schema.create_table_from_entity(crate::entities::software::Entity);
  db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

  let stmt = schema.create_table_from_entity(crate::entities::customer::Entity);
  db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

  let stmt = schema.create_table_from_entity(crate::entities::project::Entity);
  db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

  let stmt = schema.create_table_from_entity(crate::entities::release::Entity);
  db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

  let stmt =
    schema.create_table_from_entity(crate::entities::project_customer::Entity);
  db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

  let stmt =
    schema.create_table_from_entity(crate::entities::ithc_software::Entity);
  db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

  db
}
