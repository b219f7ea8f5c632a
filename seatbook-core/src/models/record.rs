use serde::{Deserialize, Serialize};

/// Column names of the reservation table, in storage order.
pub const TABLE_HEADER: [&str; 4] = ["seat_number", "holder_name", "holder_document", "day"];

/// A reservation ready to be appended to persistence.
///
/// `day` is an opaque key compared by exact equality; no calendar parsing happens anywhere
/// in the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationRecord {
    pub seat_number: u32,
    pub holder_name: String,
    pub holder_document: String,
    pub day: String,
}

/// A row as scanned back from persistence.
///
/// Rows are written by other tools too, so nothing about them is trusted: `seat_number` is
/// `None` when the cell is empty or not an integer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableRow {
    pub seat_number: Option<i64>,
    pub holder_name: String,
    pub holder_document: String,
    pub day: String,
}

impl TableRow {
    /// Whether this row is the reservation of `seat` on `day`.
    pub fn matches(&self, seat: u32, day: &str) -> bool {
        self.seat_number == Some(i64::from(seat)) && self.day == day
    }
}

impl From<ReservationRecord> for TableRow {
    fn from(record: ReservationRecord) -> Self {
        Self {
            seat_number: Some(i64::from(record.seat_number)),
            holder_name: record.holder_name,
            holder_document: record.holder_document,
            day: record.day,
        }
    }
}
