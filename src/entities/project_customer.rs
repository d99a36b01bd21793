//! Project-customer association (plain many-to-many, no attributes)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_customers")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub project_id: i32,
  #[sea_orm(primary_key, auto_increment = false)]
  pub customer_id: i32,
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
    belongs_to = "super::customer::Entity",
    from = "Column::CustomerId",
    to = "super::customer::Column::Id"
  )]
  Customer,
}

impl Related<super::project::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Project.def()
  }
}

impl Related<super::customer::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Customer.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
