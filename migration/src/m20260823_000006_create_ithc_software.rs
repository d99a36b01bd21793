use sea_orm_migration::prelude::*;

use super::m20260823_000001_create_software::Software;
use super::m20260823_000003_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(IthcSoftware::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(IthcSoftware::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(IthcSoftware::ProjectId).integer().not_null())
          .col(ColumnDef::new(IthcSoftware::SoftwareId).integer().not_null())
          .col(
            ColumnDef::new(IthcSoftware::ProjectVersion).string().not_null(),
          )
          .col(
            ColumnDef::new(IthcSoftware::CurrentSoftwareVersion)
              .string()
              .not_null(),
          )
          .col(ColumnDef::new(IthcSoftware::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(IthcSoftware::UpdatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_ithc_software_project")
              .from(IthcSoftware::Table, IthcSoftware::ProjectId)
              .to(Projects::Table, Projects::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_ithc_software_software")
              .from(IthcSoftware::Table, IthcSoftware::SoftwareId)
              .to(Software::Table, Software::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_ithc_software_triple")
          .table(IthcSoftware::Table)
          .col(IthcSoftware::ProjectId)
          .col(IthcSoftware::SoftwareId)
          .col(IthcSoftware::ProjectVersion)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(IthcSoftware::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum IthcSoftware {
  Table,
  Id,
  ProjectId,
  SoftwareId,
  ProjectVersion,
  CurrentSoftwareVersion,
  CreatedAt,
  UpdatedAt,
}
