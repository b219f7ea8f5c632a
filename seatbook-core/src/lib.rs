//! Reservation core for a single fixed-capacity bus.
//!
//! The [`store::ReservationStore`] owns the seat status array for one loaded day and keeps
//! it consistent with a [`table::ReservationTable`]. The [`service::ReservationService`]
//! is the façade presentation layers talk to: it parses raw input, delegates to the store,
//! and hands back outcomes that render as user-facing messages.

pub mod models;
pub mod render;
pub mod service;
pub mod store;
pub mod table;
