//! SeaORM entity definitions for the inventory database.

pub mod customer;
pub mod ithc_software;
pub mod prelude;
pub mod project;
pub mod project_customer;
pub mod release;
pub mod software;
