//! Persistence port for reservation rows, and the backends that implement it.
//!
//! Every backend follows the same contract: a missing underlying file turns all three
//! operations into no-ops. Anything else that goes wrong is a [`TableError`] and the
//! caller decides whether to surface or absorb it.

mod memory;
mod sheet;
mod sqlite;

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{ReservationRecord, TableRow};

pub use memory::MemoryTable;
pub use sheet::SheetFile;
pub use sqlite::SqliteTable;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse workbook {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("workbook {path} has no sheet named '{sheet}'")]
    MissingSheet { path: PathBuf, sheet: String },
    #[error("{0} already exists")]
    AlreadyExists(PathBuf),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("reservation table is unavailable")]
    Unavailable,
}

/// Row-oriented store of reservations with a fixed four-column schema.
///
/// Rows keep insertion order; `scan_all` never returns the header row.
pub trait ReservationTable: Send {
    /// Add one record after the last row.
    fn append_row(&self, record: &ReservationRecord) -> Result<(), TableError>;

    /// Remove the first row whose seat and day equal the given values, keeping the order
    /// of the remaining rows. Returns whether a row was removed.
    fn delete_first_matching(&self, seat: u32, day: &str) -> Result<bool, TableError>;

    /// All rows in storage order, malformed ones included.
    fn scan_all(&self) -> Result<Vec<TableRow>, TableError>;

    /// Short human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Which backend a data file uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[default]
    Sheet,
    Sqlite,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sheet => "sheet",
            Self::Sqlite => "sqlite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sheet" => Some(Self::Sheet),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}
