//! Customer entity - an organisation associated with projects

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub name: String,
  pub email: Option<String>,
  pub contact_person: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::project_customer::Entity")]
  ProjectCustomers,
}

impl Related<super::project::Entity> for Entity {
  fn to() -> RelationDef {
    super::project_customer::Relation::Project.def()
  }

  fn via() -> Option<RelationDef> {
    Some(super::project_customer::Relation::Customer.def().rev())
  }
}

impl ActiveModelBehavior for ActiveModel {}
