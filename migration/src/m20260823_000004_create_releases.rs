use sea_orm_migration::prelude::*;

use super::m20260823_000003_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Releases::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Releases::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Releases::Version).string().not_null())
          .col(ColumnDef::new(Releases::ReleaseDate).date_time().not_null())
          .col(ColumnDef::new(Releases::Notes).string().null())
          .col(ColumnDef::new(Releases::ProjectId).integer().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_releases_project")
              .from(Releases::Table, Releases::ProjectId)
              .to(Projects::Table, Projects::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_releases_project")
          .table(Releases::Table)
          .col(Releases::ProjectId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Releases::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Releases {
  Table,
  Id,
  Version,
  ReleaseDate,
  Notes,
  ProjectId,
}
