//! Entity prelude for convenient imports

pub use super::customer::{
  ActiveModel as CustomerActiveModel, Entity as Customer,
  Model as CustomerModel,
};
pub use super::ithc_software::{
  ActiveModel as IthcSoftwareActiveModel, Entity as IthcSoftware,
  Model as IthcSoftwareModel,
};
pub use super::project::{
  ActiveModel as ProjectActiveModel, Entity as Project, Model as ProjectModel,
};
pub use super::project_customer::{
  ActiveModel as ProjectCustomerActiveModel, Entity as ProjectCustomer,
  Model as ProjectCustomerModel,
};
pub use super::release::{
  ActiveModel as ReleaseActiveModel, Entity as Release, Model as ReleaseModel,
};
pub use super::software::{
  ActiveModel as SoftwareActiveModel, Entity as Software,
  Model as SoftwareModel,
};
