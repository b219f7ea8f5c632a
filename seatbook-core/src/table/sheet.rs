use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ReservationTable, TableError};
use crate::models::{ReservationRecord, TableRow, TABLE_HEADER};

/// A JSON workbook: named sheets, each a list of rows, each row a list of cells.
///
/// The first row of a sheet is its header. Every mutation reads the whole file, edits it
/// in memory, and saves the whole file back.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Workbook {
    #[serde(default)]
    sheets: BTreeMap<String, Vec<Vec<Value>>>,
}

/// Spreadsheet-style reservation file.
#[derive(Debug, Clone)]
pub struct SheetFile {
    path: PathBuf,
    sheet: String,
}

impl SheetFile {
    pub const DEFAULT_SHEET: &'static str = "Reservations";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_sheet(path, Self::DEFAULT_SHEET)
    }

    pub fn with_sheet(path: impl Into<PathBuf>, sheet: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet: sheet.into(),
        }
    }

    /// Create a workbook holding one sheet with only the header row.
    ///
    /// Refuses to overwrite an existing file.
    pub fn create(path: impl Into<PathBuf>, sheet: impl Into<String>) -> Result<Self, TableError> {
        let file = Self::with_sheet(path, sheet);
        if file.path.exists() {
            return Err(TableError::AlreadyExists(file.path));
        }
        if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| TableError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut workbook = Workbook::default();
        workbook.sheets.insert(file.sheet.clone(), vec![header_row()]);
        file.save(&workbook)?;
        tracing::info!(path = %file.path.display(), sheet = %file.sheet, "Created reservation workbook");
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// `None` when the file does not exist.
    fn open(&self) -> Result<Option<Workbook>, TableError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(TableError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let workbook = serde_json::from_str(&content).map_err(|source| TableError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(workbook))
    }

    fn rows_mut<'a>(&self, workbook: &'a mut Workbook) -> Result<&'a mut Vec<Vec<Value>>, TableError> {
        workbook
            .sheets
            .get_mut(&self.sheet)
            .ok_or_else(|| TableError::MissingSheet {
                path: self.path.clone(),
                sheet: self.sheet.clone(),
            })
    }

    /// Write to a sibling file first, then rename it over the workbook.
    fn save(&self, workbook: &Workbook) -> Result<(), TableError> {
        let io_err = |source| TableError::Io {
            path: self.path.clone(),
            source,
        };
        let content = serde_json::to_string_pretty(workbook).map_err(|source| TableError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, content).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl ReservationTable for SheetFile {
    fn append_row(&self, record: &ReservationRecord) -> Result<(), TableError> {
        let Some(mut workbook) = self.open()? else {
            tracing::debug!(path = %self.path.display(), "Workbook missing, append skipped");
            return Ok(());
        };
        let rows = self.rows_mut(&mut workbook)?;
        // An empty sheet would otherwise turn the first reservation into its header.
        if rows.is_empty() {
            rows.push(header_row());
        }
        rows.push(vec![
            Value::from(record.seat_number),
            Value::from(record.holder_name.as_str()),
            Value::from(record.holder_document.as_str()),
            Value::from(record.day.as_str()),
        ]);
        self.save(&workbook)
    }

    fn delete_first_matching(&self, seat: u32, day: &str) -> Result<bool, TableError> {
        let Some(mut workbook) = self.open()? else {
            tracing::debug!(path = %self.path.display(), "Workbook missing, delete skipped");
            return Ok(false);
        };
        let rows = self.rows_mut(&mut workbook)?;
        let found = rows
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, cells)| parse_row(cells).matches(seat, day))
            .map(|(index, _)| index);

        match found {
            Some(index) => {
                rows.remove(index);
                self.save(&workbook)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn scan_all(&self) -> Result<Vec<TableRow>, TableError> {
        let Some(mut workbook) = self.open()? else {
            return Ok(Vec::new());
        };
        let rows = self.rows_mut(&mut workbook)?;
        Ok(rows.iter().skip(1).map(|cells| parse_row(cells)).collect())
    }

    fn describe(&self) -> String {
        format!("{} [{}]", self.path.display(), self.sheet)
    }
}

fn header_row() -> Vec<Value> {
    TABLE_HEADER.iter().map(|h| Value::from(*h)).collect()
}

fn parse_row(cells: &[Value]) -> TableRow {
    TableRow {
        seat_number: cells.first().and_then(integer_cell),
        holder_name: text_cell(cells.get(1)),
        holder_document: text_cell(cells.get(2)),
        day: text_cell(cells.get(3)),
    }
}

/// Spreadsheet tools store whole numbers as floats, so `3.0` counts as seat 3.
fn integer_cell(cell: &Value) -> Option<i64> {
    match cell {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

fn text_cell(cell: Option<&Value>) -> String {
    match cell {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_cells_accept_whole_floats_only() {
        assert_eq!(integer_cell(&json!(4)), Some(4));
        assert_eq!(integer_cell(&json!(4.0)), Some(4));
        assert_eq!(integer_cell(&json!(4.5)), None);
        assert_eq!(integer_cell(&json!("4")), None);
        assert_eq!(integer_cell(&Value::Null), None);
    }

    #[test]
    fn short_rows_parse_with_blank_cells() {
        let row = parse_row(&[json!(2), json!("Ana")]);
        assert_eq!(row.seat_number, Some(2));
        assert_eq!(row.holder_name, "Ana");
        assert_eq!(row.holder_document, "");
        assert_eq!(row.day, "");
    }
}
