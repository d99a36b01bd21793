//! Merge-by-key import per entity kind
//!
//! Each row is reconciled through the record services, so the same
//! validation rules apply as on the single-record endpoints; only the
//! merge policy differs. A failing row is counted as skipped and never
//! aborts the rows after it — every service call is its own commit
//! boundary.

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::error::AppResult;
use crate::reconcile::ImportSummary;
use crate::reconcile::sheet::{Sheet, cell};
use crate::services::customer::CustomerPayload;
use crate::services::ithc::IthcPayload;
use crate::services::project::ProjectPayload;
use crate::services::software::SoftwarePayload;
use crate::services::{
  CustomerService, IthcService, ProjectService, SoftwareService,
};

fn non_empty(value: &str) -> Option<String> {
  if value.is_empty() { None } else { Some(value.to_string()) }
}

/// Software rows are keyed by name; an existing name is rejected as a
/// duplicate and counted as skipped.
pub async fn import_software(
  db: &DatabaseConnection,
  bytes: &[u8],
) -> AppResult<ImportSummary> {
  let sheet = Sheet::parse(bytes)?;
  let col_name = sheet.column(&["Name", "name"]);
  let col_type = sheet.column(&["Type", "Software Type", "software_type"]);
  let col_version = sheet.column(&["Latest Version", "latest_version"]);
  let col_url = sheet.column(&["Check URL", "check_url"]);

  let mut summary = ImportSummary::default();
  for row in sheet.rows() {
    let name = cell(row, col_name);
    let software_type = cell(row, col_type);
    if name.is_empty() || software_type.is_empty() {
      summary.skipped += 1;
      continue;
    }

    let payload = SoftwarePayload {
      name: Some(name.to_string()),
      software_type: Some(software_type.to_string()),
      latest_version: non_empty(cell(row, col_version)),
      check_url: non_empty(cell(row, col_url)),
    };

    match SoftwareService::create(db, payload).await {
      Ok(_) => summary.imported += 1,
      Err(err) => {
        warn!("software import row '{name}' skipped: {err}");
        summary.skipped += 1;
      }
    }
  }

  Ok(summary)
}

/// Project rows are keyed by name; a match updates the description,
/// software link and software version in place.
pub async fn import_projects(
  db: &DatabaseConnection,
  bytes: &[u8],
) -> AppResult<ImportSummary> {
  let sheet = Sheet::parse(bytes)?;
  let col_name = sheet.column(&["Name", "Project", "name"]);
  let col_description = sheet.column(&["Description", "description"]);
  let col_software = sheet.column(&["Software", "software", "software_name"]);
  let col_version = sheet.column(&["Software Version", "software_version"]);

  let mut summary = ImportSummary::default();
  for row in sheet.rows() {
    let name = cell(row, col_name);
    if name.is_empty() {
      summary.skipped += 1;
      continue;
    }

    // An unresolvable software name leaves the link untouched; the
    // link is optional on projects, so the row itself still counts.
    let software_id = match non_empty(cell(row, col_software)) {
      Some(software_name) => SoftwareService::find_by_name(db, &software_name)
        .await
        .ok()
        .flatten()
        .map(|s| s.id),
      None => None,
    };

    let payload = ProjectPayload {
      name: Some(name.to_string()),
      description: Some(cell(row, col_description).to_string()),
      software_id,
      software_version: Some(cell(row, col_version).to_string()),
    };

    let existing = match ProjectService::find_by_name(db, name).await {
      Ok(existing) => existing,
      Err(err) => {
        warn!("project import row '{name}' skipped: {err}");
        summary.skipped += 1;
        continue;
      }
    };

    let result = match &existing {
      Some(project) => {
        ProjectService::update(db, project.id, payload).await.map(|_| ())
      }
      None => ProjectService::create(db, payload).await.map(|_| ()),
    };

    match result {
      Ok(()) if existing.is_some() => summary.updated += 1,
      Ok(()) => summary.imported += 1,
      Err(err) => {
        warn!("project import row '{name}' skipped: {err}");
        summary.skipped += 1;
      }
    }
  }

  Ok(summary)
}

/// Customer rows are keyed by name; on a match, only non-empty imported
/// values overwrite the existing email/contact fields.
pub async fn import_customers(
  db: &DatabaseConnection,
  bytes: &[u8],
) -> AppResult<ImportSummary> {
  let sheet = Sheet::parse(bytes)?;
  let col_name = sheet.column(&["Name", "name"]);
  let col_email = sheet.column(&["Email", "email"]);
  let col_contact = sheet.column(&["Contact Person", "contact_person"]);

  let mut summary = ImportSummary::default();
  for row in sheet.rows() {
    let name = cell(row, col_name);
    if name.is_empty() {
      summary.skipped += 1;
      continue;
    }

    let payload = CustomerPayload {
      name: Some(name.to_string()),
      email: non_empty(cell(row, col_email)),
      contact_person: non_empty(cell(row, col_contact)),
    };

    let existing = match CustomerService::find_by_name(db, name).await {
      Ok(existing) => existing,
      Err(err) => {
        warn!("customer import row '{name}' skipped: {err}");
        summary.skipped += 1;
        continue;
      }
    };

    let result = match &existing {
      Some(customer) => {
        CustomerService::update(db, customer.id, payload).await.map(|_| ())
      }
      None => CustomerService::create(db, payload).await.map(|_| ()),
    };

    match result {
      Ok(()) if existing.is_some() => summary.updated += 1,
      Ok(()) => summary.imported += 1,
      Err(err) => {
        warn!("customer import row '{name}' skipped: {err}");
        summary.skipped += 1;
      }
    }
  }

  Ok(summary)
}

/// ITHC rows are keyed by the (project, software, project version)
/// triple, resolved from project and software names. Unresolvable names
/// or blank version fields skip the row.
pub async fn import_ithc(
  db: &DatabaseConnection,
  bytes: &[u8],
) -> AppResult<ImportSummary> {
  let sheet = Sheet::parse(bytes)?;
  let col_project = sheet.column(&["Project", "project", "project_name"]);
  let col_software = sheet.column(&["Software", "software", "software_name"]);
  let col_project_version =
    sheet.column(&["Project Version", "project_version"]);
  let col_current = sheet
    .column(&["Current Software Version", "current_software_version"]);

  let mut summary = ImportSummary::default();
  for row in sheet.rows() {
    let project_name = cell(row, col_project);
    let software_name = cell(row, col_software);
    let project_version = cell(row, col_project_version);
    let current = cell(row, col_current);

    if project_name.is_empty()
      || software_name.is_empty()
      || project_version.is_empty()
      || current.is_empty()
    {
      summary.skipped += 1;
      continue;
    }

    let project =
      ProjectService::find_by_name(db, project_name).await.ok().flatten();
    let software =
      SoftwareService::find_by_name(db, software_name).await.ok().flatten();
    let (Some(project), Some(software)) = (project, software) else {
      warn!(
        "ithc import row skipped: unresolved '{project_name}' / \
         '{software_name}'"
      );
      summary.skipped += 1;
      continue;
    };

    let existing = match IthcService::find_by_triple(
      db,
      project.id,
      software.id,
      project_version,
    )
    .await
    {
      Ok(existing) => existing,
      Err(err) => {
        warn!("ithc import row skipped: {err}");
        summary.skipped += 1;
        continue;
      }
    };

    let result = match &existing {
      Some(entry) => IthcService::update(
        db,
        entry.id,
        IthcPayload {
          current_software_version: Some(current.to_string()),
          ..Default::default()
        },
      )
      .await
      .map(|_| ()),
      None => IthcService::create(
        db,
        IthcPayload {
          project_id: Some(project.id),
          software_id: Some(software.id),
          project_version: Some(project_version.to_string()),
          current_software_version: Some(current.to_string()),
        },
      )
      .await
      .map(|_| ()),
    };

    match result {
      Ok(()) if existing.is_some() => summary.updated += 1,
      Ok(()) => summary.imported += 1,
      Err(err) => {
        warn!("ithc import row skipped: {err}");
        summary.skipped += 1;
      }
    }
  }

  Ok(summary)
}

#[cfg(test)]
mod tests {
  use rust_xlsxwriter::Workbook;

  use super::*;
  use crate::reconcile::{TemplateKind, template};
  use crate::services::test_db;

  fn workbook(headers: &[&str], rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
      worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
      for (c, value) in row.iter().enumerate() {
        worksheet.write_string(r as u32 + 1, c as u16, *value).unwrap();
      }
    }
    workbook.save_to_buffer().unwrap()
  }

  #[tokio::test]
  async fn test_software_import_counts() {
    let db = test_db().await;

    let bytes = workbook(
      &["Name", "Type", "Latest Version", "Check URL"],
      &[
        &["nginx", "Server", "1.24", "http://nginx.org"],
        &["redis", "Cache", "7.2", ""],
        &["nginx", "Server", "1.25", ""], // duplicate of row 1
        &["", "Server", "1.0", ""],       // missing name
      ],
    );

    let summary = import_software(&db, &bytes).await.unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.skipped, 2);

    let nginx = SoftwareService::find_by_name(&db, "nginx")
      .await
      .unwrap()
      .unwrap();
    assert_eq!(nginx.latest_version.as_deref(), Some("1.24"));
  }

  #[tokio::test]
  async fn test_software_import_machine_headers() {
    let db = test_db().await;

    let bytes = workbook(
      &["name", "software_type", "latest_version"],
      &[&["nginx", "Server", "1.24"]],
    );

    let summary = import_software(&db, &bytes).await.unwrap();
    assert_eq!(summary.imported, 1);
  }

  #[tokio::test]
  async fn test_customer_import_merges_by_name() {
    let db = test_db().await;

    CustomerService::create(
      &db,
      CustomerPayload {
        name: Some("Acme".to_string()),
        email: Some("ops@acme.example".to_string()),
        contact_person: Some("Jo Bloggs".to_string()),
      },
    )
    .await
    .unwrap();

    let bytes = workbook(
      &["Name", "Email", "Contact Person"],
      &[
        &["Globex", "it@globex.example", "H. Simpson"],
        &["Initech", "", ""],
        &["Acme", "", "New Contact"], // blank email must not clobber
      ],
    );

    let summary = import_customers(&db, &bytes).await.unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.skipped, 0);
    assert_eq!(CustomerService::list(&db).await.unwrap().len(), 3);

    let acme =
      CustomerService::find_by_name(&db, "Acme").await.unwrap().unwrap();
    assert_eq!(acme.email.as_deref(), Some("ops@acme.example"));
    assert_eq!(acme.contact_person.as_deref(), Some("New Contact"));
  }

  #[tokio::test]
  async fn test_project_import_updates_in_place() {
    let db = test_db().await;

    let software = SoftwareService::create(
      &db,
      SoftwarePayload {
        name: Some("nginx".to_string()),
        software_type: Some("Server".to_string()),
        ..Default::default()
      },
    )
    .await
    .unwrap();

    let bytes = workbook(
      &["Name", "Description", "Software", "Software Version"],
      &[&["P1", "initial", "nginx", "1.24"]],
    );
    let summary = import_projects(&db, &bytes).await.unwrap();
    assert_eq!(summary.imported, 1);

    let bytes = workbook(
      &["Name", "Description", "Software", "Software Version"],
      &[&["P1", "revised", "nginx", "1.24"]],
    );
    let summary = import_projects(&db, &bytes).await.unwrap();
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.imported, 0);

    let project =
      ProjectService::find_by_name(&db, "P1").await.unwrap().unwrap();
    assert_eq!(project.description.as_deref(), Some("revised"));
    assert_eq!(project.software_id, Some(software.id));
  }

  #[tokio::test]
  async fn test_ithc_import_unresolved_names_skipped() {
    let db = test_db().await;

    let bytes = workbook(
      &["Project", "Software", "Project Version", "Current Software Version"],
      &[&["ghost", "nginx", "2025.1", "1.24"]],
    );

    let summary = import_ithc(&db, &bytes).await.unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.imported, 0);
    assert!(IthcService::list(&db, None, None).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_ithc_import_insert_then_update() {
    let db = test_db().await;

    ProjectService::create(
      &db,
      ProjectPayload { name: Some("P1".to_string()), ..Default::default() },
    )
    .await
    .unwrap();
    SoftwareService::create(
      &db,
      SoftwarePayload {
        name: Some("nginx".to_string()),
        software_type: Some("Server".to_string()),
        ..Default::default()
      },
    )
    .await
    .unwrap();

    let headers =
      ["Project", "Software", "Project Version", "Current Software Version"];

    let bytes = workbook(&headers, &[&["P1", "nginx", "2025.1", "1.24"]]);
    let summary = import_ithc(&db, &bytes).await.unwrap();
    assert_eq!(summary.imported, 1);

    let bytes = workbook(&headers, &[&["P1", "nginx", "2025.1", "1.26"]]);
    let summary = import_ithc(&db, &bytes).await.unwrap();
    assert_eq!(summary.updated, 1);

    let entries = IthcService::list(&db, None, None).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].current_software_version, "1.26");
  }

  #[tokio::test]
  async fn test_ithc_import_blank_versions_skipped() {
    let db = test_db().await;

    let bytes = workbook(
      &["Project", "Software", "Project Version", "Current Software Version"],
      &[&["P1", "nginx", "", "1.24"]],
    );

    let summary = import_ithc(&db, &bytes).await.unwrap();
    assert_eq!(summary.skipped, 1);
  }

  #[tokio::test]
  async fn test_template_round_trip() {
    let db = test_db().await;

    let template_bytes = template(TemplateKind::Software).unwrap();
    let sheet = Sheet::parse(&template_bytes).unwrap();
    assert!(sheet.rows().is_empty());

    // Write one data row under the template's own headers, save it to
    // disk as a client would, and import the file contents
    let bytes = workbook(
      TemplateKind::Software.headers(),
      &[&["nginx", "Server", "1.24", "http://nginx.org"]],
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("software.xlsx");
    std::fs::write(&path, &bytes).unwrap();

    let uploaded = std::fs::read(&path).unwrap();
    let summary = import_software(&db, &uploaded).await.unwrap();
    assert_eq!(summary.imported, 1);
  }

  #[tokio::test]
  async fn test_unparseable_file_aborts() {
    let db = test_db().await;

    let result = import_software(&db, b"not a workbook").await;
    assert!(matches!(result, Err(crate::error::AppError::FileFormat(_))));
  }
}
