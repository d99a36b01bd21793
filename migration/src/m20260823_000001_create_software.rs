use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Software::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Software::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Software::Name).string().not_null().unique_key(),
          )
          .col(ColumnDef::new(Software::SoftwareType).string().not_null())
          .col(ColumnDef::new(Software::LatestVersion).string().null())
          .col(ColumnDef::new(Software::LastUpdated).date_time().not_null())
          .col(ColumnDef::new(Software::CheckUrl).string().null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Software::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Software {
  Table,
  Id,
  Name,
  SoftwareType,
  LatestVersion,
  LastUpdated,
  CheckUrl,
}
