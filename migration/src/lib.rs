pub use sea_orm_migration::prelude::*;

mod m20260823_000001_create_software;
mod m20260823_000002_create_customers;
mod m20260823_000003_create_projects;
mod m20260823_000004_create_releases;
mod m20260823_000005_create_project_customers;
mod m20260823_000006_create_ithc_software;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260823_000001_create_software::Migration),
      Box::new(m20260823_000002_create_customers::Migration),
      Box::new(m20260823_000003_create_projects::Migration),
      Box::new(m20260823_000004_create_releases::Migration),
      Box::new(m20260823_000005_create_project_customers::Migration),
      Box::new(m20260823_000006_create_ithc_software::Migration),
    ]
  }
}
