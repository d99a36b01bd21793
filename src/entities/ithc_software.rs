//! ITHC software entity - which software version a project version was
//! observed running, against the latest known version

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ithc_software")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub project_id: i32,
  pub software_id: i32,
  pub project_version: String,
  pub current_software_version: String,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::project::Entity",
    from = "Column::ProjectId",
    to = "super::project::Column::Id"
  )]
  Project,
  #[sea_orm(
    belongs_to = "super::software::Entity",
    from = "Column::SoftwareId",
    to = "super::software::Column::Id"
  )]
  Software,
}

impl Related<super::project::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Project.def()
  }
}

impl Related<super::software::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Software.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
