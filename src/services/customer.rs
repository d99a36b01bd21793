//! Customer service - organisations associated with projects
//!
//! The schema enforces no uniqueness on customer names; only the
//! reconciler dedups by name during imports.

use sea_orm::{
  ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
  Set,
};
use serde::Deserialize;

use crate::entities::customer;
use crate::entities::prelude::*;
use crate::error::{AppError, AppResult};
use crate::services::{none_if_blank, required};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct CustomerPayload {
  pub name: Option<String>,
  pub email: Option<String>,
  pub contact_person: Option<String>,
}

pub struct CustomerService;

impl CustomerService {
  pub async fn create(
    db: &DatabaseConnection,
    payload: CustomerPayload,
  ) -> AppResult<CustomerModel> {
    let name = required(&payload.name, "name")?;

    let customer = CustomerActiveModel {
      name: Set(name),
      email: Set(none_if_blank(payload.email)),
      contact_person: Set(none_if_blank(payload.contact_person)),
      ..Default::default()
    };

    Ok(customer.insert(db).await?)
  }

  pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<CustomerModel> {
    Customer::find_by_id(id)
      .one(db)
      .await?
      .ok_or_else(|| AppError::not_found("Customer", id))
  }

  pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<CustomerModel>> {
    Ok(Customer::find().all(db).await?)
  }

  pub async fn search(
    db: &DatabaseConnection,
    query: &str,
  ) -> AppResult<Vec<CustomerModel>> {
    let results = Customer::find()
      .filter(customer::Column::Name.contains(query))
      .all(db)
      .await?;
    Ok(results)
  }

  /// Exact-name lookup (first match), the reconciler's dedup key.
  pub async fn find_by_name(
    db: &DatabaseConnection,
    name: &str,
  ) -> AppResult<Option<CustomerModel>> {
    let customer = Customer::find()
      .filter(customer::Column::Name.eq(name))
      .one(db)
      .await?;
    Ok(customer)
  }

  pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: CustomerPayload,
  ) -> AppResult<CustomerModel> {
    let customer = Self::get(db, id).await?;

    let mut customer: CustomerActiveModel = customer.into();
    if let Some(name) = payload.name
      && !name.trim().is_empty()
    {
      customer.name = Set(name.trim().to_string());
    }
    if payload.email.is_some() {
      customer.email = Set(none_if_blank(payload.email));
    }
    if payload.contact_person.is_some() {
      customer.contact_person = Set(none_if_blank(payload.contact_person));
    }

    Ok(customer.update(db).await?)
  }

  pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    use sea_orm::TransactionTrait;

    use crate::entities::project_customer;

    Self::get(db, id).await?;

    let txn = db.begin().await?;
    ProjectCustomer::delete_many()
      .filter(project_customer::Column::CustomerId.eq(id))
      .exec(&txn)
      .await?;
    Customer::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    Ok(())
  }
}
