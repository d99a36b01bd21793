//! Software entity - a known software product and its latest version

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "software")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  #[sea_orm(unique)]
  pub name: String,
  pub software_type: String,
  pub latest_version: Option<String>,
  pub last_updated: NaiveDateTime,
  pub check_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::project::Entity")]
  Projects,
  #[sea_orm(has_many = "super::ithc_software::Entity")]
  IthcSoftware,
}

impl Related<super::project::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Projects.def()
  }
}

impl Related<super::ithc_software::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::IthcSoftware.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
