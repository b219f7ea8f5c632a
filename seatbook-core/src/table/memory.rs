use std::sync::{Arc, Mutex};

use super::{ReservationTable, TableError};
use crate::models::{ReservationRecord, TableRow};

/// In-process table. Clones share the same rows, so a test can keep a handle while the
/// store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<TableRow>,
    unavailable: bool,
    writes: usize,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<TableRow>) -> Self {
        let table = Self::default();
        table.inner.lock().expect("table lock poisoned").rows = rows;
        table
    }

    /// Current rows, in order.
    pub fn rows(&self) -> Vec<TableRow> {
        self.inner.lock().expect("table lock poisoned").rows.clone()
    }

    /// Number of successful append and delete calls that changed the rows.
    pub fn writes(&self) -> usize {
        self.inner.lock().expect("table lock poisoned").writes
    }

    /// Make every operation fail with [`TableError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().expect("table lock poisoned").unavailable = unavailable;
    }
}

impl ReservationTable for MemoryTable {
    fn append_row(&self, record: &ReservationRecord) -> Result<(), TableError> {
        let mut inner = self.inner.lock().expect("table lock poisoned");
        if inner.unavailable {
            return Err(TableError::Unavailable);
        }
        inner.rows.push(record.clone().into());
        inner.writes += 1;
        Ok(())
    }

    fn delete_first_matching(&self, seat: u32, day: &str) -> Result<bool, TableError> {
        let mut inner = self.inner.lock().expect("table lock poisoned");
        if inner.unavailable {
            return Err(TableError::Unavailable);
        }
        match inner.rows.iter().position(|r| r.matches(seat, day)) {
            Some(index) => {
                inner.rows.remove(index);
                inner.writes += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn scan_all(&self) -> Result<Vec<TableRow>, TableError> {
        let inner = self.inner.lock().expect("table lock poisoned");
        if inner.unavailable {
            return Err(TableError::Unavailable);
        }
        Ok(inner.rows.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
