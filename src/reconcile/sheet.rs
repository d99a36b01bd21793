//! Workbook parsing and tolerant header mapping

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::{AppError, AppResult};

/// A parsed worksheet: the first row as headers, the rest as text cells.
/// Parsed entirely from memory, so no temporary file is left behind on
/// any path.
pub struct Sheet {
  headers: Vec<String>,
  rows: Vec<Vec<String>>,
}

impl Sheet {
  /// Parse the first worksheet of an `.xlsx`/`.xls` byte buffer.
  pub fn parse(bytes: &[u8]) -> AppResult<Self> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
      .map_err(|err| {
        AppError::FileFormat(format!("could not read spreadsheet: {err}"))
      })?;

    let range = workbook
      .worksheet_range_at(0)
      .ok_or_else(|| {
        AppError::FileFormat("spreadsheet has no worksheets".into())
      })?
      .map_err(|err| {
        AppError::FileFormat(format!("could not read worksheet: {err}"))
      })?;

    let mut rows = range.rows();
    let headers = rows
      .next()
      .map(|row| row.iter().map(cell_text).collect())
      .unwrap_or_default();
    let rows = rows.map(|row| row.iter().map(cell_text).collect()).collect();

    Ok(Self { headers, rows })
  }

  /// Resolve a field to a column index from an ordered candidate list
  /// of historical header spellings; the first present wins.
  pub fn column(&self, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
      self.headers.iter().position(|h| h.eq_ignore_ascii_case(candidate))
    })
  }

  pub fn rows(&self) -> &[Vec<String>] {
    &self.rows
  }
}

/// Cell accessor for a mapped column; unmapped or out-of-range reads
/// come back as the empty string.
pub fn cell<'a>(row: &'a [String], col: Option<usize>) -> &'a str {
  col.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}

fn cell_text(cell: &Data) -> String {
  match cell {
    Data::Empty => String::new(),
    Data::String(s) => s.trim().to_string(),
    // Excel stores bare numbers as floats; "2" must not import as "2.0"
    Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
    Data::Float(f) => f.to_string(),
    Data::Int(i) => i.to_string(),
    Data::Bool(b) => b.to_string(),
    other => other.to_string().trim().to_string(),
  }
}

#[cfg(test)]
mod tests {
  use rust_xlsxwriter::Workbook;

  use super::*;

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

  #[test]
  fn test_parse_headers_and_rows() {
    let bytes =
      workbook(&["Name", "Type"], &[&["nginx", "Server"], &["redis", "Cache"]]);
    let sheet = Sheet::parse(&bytes).unwrap();

    assert_eq!(sheet.column(&["Name", "name"]), Some(0));
    assert_eq!(sheet.rows().len(), 2);
    assert_eq!(cell(&sheet.rows()[1], Some(0)), "redis");
  }

  #[test]
  fn test_candidate_order_and_case() {
    let bytes = workbook(&["software_type", "NAME"], &[]);
    let sheet = Sheet::parse(&bytes).unwrap();

    assert_eq!(sheet.column(&["Type", "Software Type", "software_type"]), Some(0));
    assert_eq!(sheet.column(&["Name", "name"]), Some(1));
    assert_eq!(sheet.column(&["Check URL", "check_url"]), None);
  }

  #[test]
  fn test_unmapped_cell_is_empty() {
    let bytes = workbook(&["Name"], &[&["nginx"]]);
    let sheet = Sheet::parse(&bytes).unwrap();

    assert_eq!(cell(&sheet.rows()[0], None), "");
    assert_eq!(cell(&sheet.rows()[0], Some(5)), "");
  }

  #[test]
  fn test_garbage_bytes_rejected() {
    let result = Sheet::parse(b"this is not a spreadsheet");
    assert!(matches!(result, Err(AppError::FileFormat(_))));
  }
}
