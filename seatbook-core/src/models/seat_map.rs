use serde::{Deserialize, Serialize};

use super::SeatStatus;
use crate::render;

/// One seat in a [`SeatMap`]. `number` is 1-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub number: u32,
    pub status: SeatStatus,
}

/// Snapshot of the occupancy of every seat for one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatMap {
    pub day: Option<String>,
    pub capacity: u32,
    pub seats: Vec<SeatView>,
}

impl SeatMap {
    pub fn occupied(&self) -> usize {
        self.seats.iter().filter(|s| s.status.is_occupied()).count()
    }

    pub fn free(&self) -> usize {
        self.seats.len() - self.occupied()
    }

    /// Same text as [`ReservationStore::render_map`](crate::store::ReservationStore::render_map).
    pub fn render(&self) -> String {
        let status: Vec<SeatStatus> = self.seats.iter().map(|s| s.status).collect();
        render::render_map(&status)
    }
}
