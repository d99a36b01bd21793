use sea_orm_migration::prelude::*;

use super::m20260823_000001_create_software::Software;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Projects::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Projects::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Projects::Name).string().not_null())
          .col(ColumnDef::new(Projects::Description).string().null())
          .col(ColumnDef::new(Projects::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Projects::SoftwareId).integer().null())
          .col(ColumnDef::new(Projects::SoftwareVersion).string().null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_projects_software")
              .from(Projects::Table, Projects::SoftwareId)
              .to(Software::Table, Software::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    // One project name may recur with different software versions
    manager
      .create_index(
        Index::create()
          .name("idx_projects_name_version")
          .table(Projects::Table)
          .col(Projects::Name)
          .col(Projects::SoftwareVersion)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Projects::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Projects {
  Table,
  Id,
  Name,
  Description,
  CreatedAt,
  SoftwareId,
  SoftwareVersion,
}
