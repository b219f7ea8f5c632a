//! Day-scoped seat status, kept consistent with a [`ReservationTable`].

use thiserror::Error;

use crate::models::{Outcome, ReservationRecord, SeatMap, SeatStatus, SeatView};
use crate::render;
use crate::table::ReservationTable;

/// Largest bus the store will allocate seats for.
pub const MAX_CAPACITY: u32 = 1_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("capacity must be at least one seat")]
    ZeroCapacity,
    #[error("capacity {0} exceeds the maximum of {max} seats", max = MAX_CAPACITY)]
    CapacityTooLarge(u32),
}

/// Seat occupancy for one loaded day, backed by a persisted reservation table.
///
/// The status array always has `capacity` entries; index `i` is seat `i + 1`. It only
/// ever describes [`loaded_day`](Self::loaded_day): reserving or cancelling for another
/// day switches to that day first. Persistence failures are logged and absorbed, so
/// memory can run ahead of disk until the next [`load`](Self::load).
pub struct ReservationStore {
    capacity: u32,
    status: Vec<SeatStatus>,
    loaded_day: Option<String>,
    table: Box<dyn ReservationTable>,
}

impl ReservationStore {
    pub fn new(capacity: u32, table: Box<dyn ReservationTable>) -> Result<Self, StoreError> {
        if capacity == 0 {
            return Err(StoreError::ZeroCapacity);
        }
        if capacity > MAX_CAPACITY {
            return Err(StoreError::CapacityTooLarge(capacity));
        }
        Ok(Self {
            capacity,
            status: vec![SeatStatus::Free; capacity as usize],
            loaded_day: None,
            table,
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn loaded_day(&self) -> Option<&str> {
        self.loaded_day.as_deref()
    }

    pub fn status(&self) -> &[SeatStatus] {
        &self.status
    }

    /// `None` when `seat` is outside `1..=capacity`.
    pub fn is_occupied(&self, seat: i64) -> Option<bool> {
        self.index_of(seat).map(|i| self.status[i].is_occupied())
    }

    pub fn occupied_count(&self) -> usize {
        self.status.iter().filter(|s| s.is_occupied()).count()
    }

    pub fn reserve(
        &mut self,
        seat: i64,
        holder_name: &str,
        holder_document: &str,
        day: &str,
    ) -> Outcome {
        let Some(index) = self.index_of(seat) else {
            tracing::debug!(seat, "Rejected reservation for invalid seat");
            return Outcome::InvalidSeat { seat };
        };
        let seat = index as u32 + 1;
        self.switch_day(day);

        if self.status[index].is_occupied() {
            return Outcome::AlreadyReserved { seat };
        }
        self.status[index] = SeatStatus::Occupied;

        let record = ReservationRecord {
            seat_number: seat,
            holder_name: holder_name.to_string(),
            holder_document: holder_document.to_string(),
            day: day.to_string(),
        };
        if let Err(e) = self.table.append_row(&record) {
            tracing::warn!(
                seat,
                day,
                table = %self.table.describe(),
                "Reservation kept in memory only: {}",
                e
            );
        }
        tracing::info!(seat, day, "Seat reserved");
        Outcome::Reserved { seat }
    }

    pub fn cancel(&mut self, seat: i64, day: &str) -> Outcome {
        let Some(index) = self.index_of(seat) else {
            tracing::debug!(seat, "Rejected cancellation for invalid seat");
            return Outcome::InvalidSeat { seat };
        };
        let seat = index as u32 + 1;
        self.switch_day(day);

        if !self.status[index].is_occupied() {
            return Outcome::NotReserved { seat };
        }
        self.status[index] = SeatStatus::Free;

        match self.table.delete_first_matching(seat, day) {
            Ok(true) => {}
            Ok(false) => tracing::debug!(seat, day, "No persisted row matched the cancellation"),
            Err(e) => tracing::warn!(
                seat,
                day,
                table = %self.table.describe(),
                "Cancellation applied in memory only: {}",
                e
            ),
        }
        tracing::info!(seat, day, "Reservation cancelled");
        Outcome::Cancelled { seat }
    }

    /// Rebuild the status array from every persisted row tagged with `day`.
    ///
    /// Rows with a missing or out-of-range seat number are skipped. An unreadable table
    /// leaves every seat free.
    pub fn load(&mut self, day: &str) {
        self.status.fill(SeatStatus::Free);
        self.loaded_day = Some(day.to_string());

        let rows = match self.table.scan_all() {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(day, table = %self.table.describe(), "Failed to scan reservations: {}", e);
                return;
            }
        };

        let mut skipped = 0usize;
        for row in rows.iter().filter(|r| r.day == day) {
            match row.seat_number.and_then(|n| self.index_of(n)) {
                Some(index) => self.status[index] = SeatStatus::Occupied,
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!(day, skipped, "Skipped rows with unusable seat numbers");
        }
        tracing::debug!(day, occupied = self.occupied_count(), "Loaded day");
    }

    /// Two-column text map of the loaded day.
    pub fn render_map(&self) -> String {
        render::render_map(&self.status)
    }

    pub fn seat_map(&self) -> SeatMap {
        SeatMap {
            day: self.loaded_day.clone(),
            capacity: self.capacity,
            seats: self
                .status
                .iter()
                .enumerate()
                .map(|(i, status)| SeatView {
                    number: i as u32 + 1,
                    status: *status,
                })
                .collect(),
        }
    }

    fn switch_day(&mut self, day: &str) {
        if self.loaded_day.as_deref() != Some(day) {
            self.load(day);
        }
    }

    fn index_of(&self, seat: i64) -> Option<usize> {
        (1..=i64::from(self.capacity))
            .contains(&seat)
            .then(|| (seat - 1) as usize)
    }
}
