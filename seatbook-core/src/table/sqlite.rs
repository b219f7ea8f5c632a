use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};

use super::{ReservationTable, TableError};
use crate::models::{ReservationRecord, TableRow};

const CREATE_TABLE: &str = include_str!("sql/reservations.sql");

/// Embedded-database backend over a single fixed-schema table. Rows come back in insertion
/// (rowid) order.
///
/// Only [`create`](Self::create) writes schema. Every other call just opens the file: a
/// missing database behaves like a missing workbook, and a file without the table fails
/// with [`TableError::Sqlite`].
#[derive(Debug, Clone)]
pub struct SqliteTable {
    path: PathBuf,
}

impl SqliteTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the database file and its table. Refuses to overwrite an existing file.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, TableError> {
        let table = Self::new(path);
        if table.path.exists() {
            return Err(TableError::AlreadyExists(table.path));
        }
        if let Some(parent) = table.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| TableError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(&table.path)?;
        conn.execute_batch(CREATE_TABLE)?;
        tracing::info!(path = %table.path.display(), "Created reservation database");
        Ok(table)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Option<Connection>, TableError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Database missing, skipping");
            return Ok(None);
        }
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Some(conn))
    }
}

impl ReservationTable for SqliteTable {
    fn append_row(&self, record: &ReservationRecord) -> Result<(), TableError> {
        let Some(conn) = self.connect()? else {
            return Ok(());
        };
        conn.execute(
            "INSERT INTO reservations (seat_number, holder_name, holder_document, day)
             VALUES (?, ?, ?, ?)",
            (
                record.seat_number,
                &record.holder_name,
                &record.holder_document,
                &record.day,
            ),
        )?;
        Ok(())
    }

    fn delete_first_matching(&self, seat: u32, day: &str) -> Result<bool, TableError> {
        let Some(conn) = self.connect()? else {
            return Ok(false);
        };
        let rows = conn.execute(
            "DELETE FROM reservations WHERE id = (
                SELECT id FROM reservations
                WHERE seat_number = ? AND day = ?
                ORDER BY id LIMIT 1
             )",
            (seat, day),
        )?;
        Ok(rows > 0)
    }

    fn scan_all(&self) -> Result<Vec<TableRow>, TableError> {
        let Some(conn) = self.connect()? else {
            return Ok(Vec::new());
        };
        let mut stmt = conn.prepare(
            "SELECT seat_number, holder_name, holder_document, day
             FROM reservations ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(TableRow {
                    seat_number: integer_value(row.get(0)?),
                    holder_name: text_value(row.get(1)?),
                    holder_document: text_value(row.get(2)?),
                    day: text_value(row.get(3)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// SQLite columns are loosely typed; other writers may have stored anything.

fn integer_value(value: Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(i),
        Value::Real(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
        _ => None,
    }
}

fn text_value(value: Value) -> String {
    match value {
        Value::Text(s) => s,
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Null | Value::Blob(_) => String::new(),
    }
}
