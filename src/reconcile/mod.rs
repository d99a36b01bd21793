//! Spreadsheet reconciler: merges uploaded workbook rows into the
//! entity store via an insert-or-update-by-key policy, and generates
//! blank import templates.

mod import;
mod sheet;

pub use import::{
  import_customers, import_ithc, import_projects, import_software,
};
pub use sheet::Sheet;

use rust_xlsxwriter::Workbook;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Outcome counters over one whole import file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
  pub imported: usize,
  pub updated: usize,
  pub skipped: usize,
}

/// Entity kinds a blank template can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
  Software,
  Project,
  Ithc,
}

impl TemplateKind {
  pub fn parse(name: &str) -> Option<Self> {
    match name {
      "software" => Some(Self::Software),
      "project" => Some(Self::Project),
      "ithc" => Some(Self::Ithc),
      _ => None,
    }
  }

  /// Canonical column names, matching the first candidate the import
  /// header mapping accepts for each field.
  pub fn headers(self) -> &'static [&'static str] {
    match self {
      Self::Software => &["Name", "Type", "Latest Version", "Check URL"],
      Self::Project => &["Name", "Description", "Software", "Software Version"],
      Self::Ithc => {
        &["Project", "Software", "Project Version", "Current Software Version"]
      }
    }
  }

  pub fn file_name(self) -> &'static str {
    match self {
      Self::Software => "software_template.xlsx",
      Self::Project => "project_template.xlsx",
      Self::Ithc => "ithc_template.xlsx",
    }
  }
}

/// Build an empty `.xlsx` template: one header row, no data rows.
pub fn template(kind: TemplateKind) -> AppResult<Vec<u8>> {
  let mut workbook = Workbook::new();
  let worksheet = workbook.add_worksheet();

  for (col, header) in kind.headers().iter().enumerate() {
    worksheet
      .write_string(0, col as u16, *header)
      .map_err(|err| AppError::Internal(err.to_string()))?;
  }

  workbook.save_to_buffer().map_err(|err| AppError::Internal(err.to_string()))
}
