use std::fmt;

use serde::{Deserialize, Serialize};

/// Result classification of a mutating store operation.
///
/// The `Display` impl yields the message shown to the person at the counter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Reserved { seat: u32 },
    Cancelled { seat: u32 },
    AlreadyReserved { seat: u32 },
    NotReserved { seat: u32 },
    /// Carries the number exactly as requested, which may be zero or negative.
    InvalidSeat { seat: i64 },
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved { .. } => "reserved",
            Self::Cancelled { .. } => "cancelled",
            Self::AlreadyReserved { .. } => "already_reserved",
            Self::NotReserved { .. } => "not_reserved",
            Self::InvalidSeat { .. } => "invalid_seat",
        }
    }

    /// Seat number the outcome refers to, as requested.
    pub fn seat(&self) -> i64 {
        match *self {
            Self::Reserved { seat }
            | Self::Cancelled { seat }
            | Self::AlreadyReserved { seat }
            | Self::NotReserved { seat } => i64::from(seat),
            Self::InvalidSeat { seat } => seat,
        }
    }

    /// True when the operation changed the seat's status.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Reserved { .. } | Self::Cancelled { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserved { seat } => write!(f, "Seat {} reserved successfully.", seat),
            Self::Cancelled { seat } => {
                write!(f, "Seat {} reservation cancelled successfully.", seat)
            }
            Self::AlreadyReserved { seat } => write!(f, "Seat {} is unavailable.", seat),
            Self::NotReserved { seat } => write!(f, "Seat {} is not reserved.", seat),
            Self::InvalidSeat { .. } => f.write_str("Invalid seat"),
        }
    }
}
