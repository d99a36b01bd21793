//! Project entity - a deployment that may pin a software version

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub name: String,
  pub description: Option<String>,
  pub created_at: NaiveDateTime,
  pub software_id: Option<i32>,
  pub software_version: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::software::Entity",
    from = "Column::SoftwareId",
    to = "super::software::Column::Id"
  )]
  Software,
  #[sea_orm(has_many = "super::release::Entity")]
  Releases,
  #[sea_orm(has_many = "super::ithc_software::Entity")]
  IthcSoftware,
  #[sea_orm(has_many = "super::project_customer::Entity")]
  ProjectCustomers,
}

impl Related<super::software::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Software.def()
  }
}

impl Related<super::release::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Releases.def()
  }
}

impl Related<super::ithc_software::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::IthcSoftware.def()
  }
}

impl Related<super::customer::Entity> for Entity {
  fn to() -> RelationDef {
    super::project_customer::Relation::Customer.def()
  }

  fn via() -> Option<RelationDef> {
    Some(super::project_customer::Relation::Project.def().rev())
  }
}

impl ActiveModelBehavior for ActiveModel {}
