use sea_orm_migration::prelude::*;

use super::m20260823_000002_create_customers::Customers;
use super::m20260823_000003_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(ProjectCustomers::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(ProjectCustomers::ProjectId).integer().not_null(),
          )
          .col(
            ColumnDef::new(ProjectCustomers::CustomerId).integer().not_null(),
          )
          .primary_key(
            Index::create()
              .col(ProjectCustomers::ProjectId)
              .col(ProjectCustomers::CustomerId),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_project_customers_project")
              .from(ProjectCustomers::Table, ProjectCustomers::ProjectId)
              .to(Projects::Table, Projects::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_project_customers_customer")
              .from(ProjectCustomers::Table, ProjectCustomers::CustomerId)
              .to(Customers::Table, Customers::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(ProjectCustomers::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum ProjectCustomers {
  Table,
  ProjectId,
  CustomerId,
}
