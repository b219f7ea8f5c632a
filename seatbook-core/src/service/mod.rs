//! Façade between presentation layers and the [`ReservationStore`].
//!
//! Presentation code hands over raw text fields. The service trims and parses them,
//! delegates to the store, and returns values whose `Display` is the message to show.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::models::{Outcome, SeatMap};
use crate::store::ReservationStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Error: invalid seat number '{0}'")]
    MalformedSeat(String),
}

pub struct ReservationService {
    store: ReservationStore,
}

impl ReservationService {
    pub fn new(store: ReservationStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ReservationStore {
        &self.store
    }

    pub fn reserve(
        &mut self,
        seat_number: &str,
        name: &str,
        document: &str,
        day: &str,
    ) -> Result<Outcome, ServiceError> {
        let seat = parse_seat(seat_number)?;
        Ok(self
            .store
            .reserve(seat, name.trim(), document.trim(), day.trim()))
    }

    pub fn cancel(&mut self, seat_number: &str, day: &str) -> Result<Outcome, ServiceError> {
        let seat = parse_seat(seat_number)?;
        Ok(self.store.cancel(seat, day.trim()))
    }

    /// Load `day` and render its occupancy map. This is the only read path.
    pub fn map(&mut self, day: &str) -> String {
        self.store.load(day.trim());
        self.store.render_map()
    }

    /// Load `day` and return its occupancy as data.
    pub fn seat_map(&mut self, day: &str) -> SeatMap {
        self.store.load(day.trim());
        self.store.seat_map()
    }
}

/// Signed parse so that `-1` is reported as an invalid seat, not as malformed input.
fn parse_seat(raw: &str) -> Result<i64, ServiceError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ServiceError::MalformedSeat(trimmed.to_string()))
}

/// Cloneable handle that serializes every service call behind one lock.
///
/// The occupancy check and the persistence write of a reservation happen under the same
/// guard, so two callers cannot both win the same seat.
#[derive(Clone)]
pub struct SharedService {
    inner: Arc<Mutex<ReservationService>>,
}

impl SharedService {
    pub fn new(service: ReservationService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    pub fn reserve(
        &self,
        seat_number: &str,
        name: &str,
        document: &str,
        day: &str,
    ) -> Result<Outcome, ServiceError> {
        self.lock().reserve(seat_number, name, document, day)
    }

    pub fn cancel(&self, seat_number: &str, day: &str) -> Result<Outcome, ServiceError> {
        self.lock().cancel(seat_number, day)
    }

    pub fn map(&self, day: &str) -> String {
        self.lock().map(day)
    }

    pub fn seat_map(&self, day: &str) -> SeatMap {
        self.lock().seat_map(day)
    }

    pub fn capacity(&self) -> u32 {
        self.lock().store().capacity()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ReservationService> {
        self.inner.lock().expect("reservation service lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seat_trims_whitespace() {
        assert_eq!(parse_seat("  12 "), Ok(12));
    }

    #[test]
    fn parse_seat_accepts_negative_numbers() {
        assert_eq!(parse_seat("-3"), Ok(-3));
    }

    #[test]
    fn parse_seat_rejects_text() {
        assert_eq!(
            parse_seat(" twelve "),
            Err(ServiceError::MalformedSeat("twelve".to_string()))
        );
        assert_eq!(
            parse_seat("").unwrap_err().to_string(),
            "Error: invalid seat number ''"
        );
    }
}
