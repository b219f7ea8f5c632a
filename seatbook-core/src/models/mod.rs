//! Domain models for seatbook.
//!
//! # Core Concepts
//!
//! - [`SeatStatus`]: occupancy of one seat for the currently loaded day.
//! - [`ReservationRecord`]: a persisted reservation, unique per `(seat_number, day)`.
//! - [`TableRow`]: a row as read back from persistence, possibly malformed.
//! - [`Outcome`]: classification of a reserve or cancel call.
//! - [`SeatMap`]: serializable snapshot of one day's occupancy.

mod outcome;
mod record;
mod seat;
mod seat_map;

pub use outcome::*;
pub use record::*;
pub use seat::*;
pub use seat_map::*;
