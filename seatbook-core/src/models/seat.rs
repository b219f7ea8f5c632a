use serde::{Deserialize, Serialize};

/// Occupancy of a single seat for the loaded day.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    #[default]
    Free,
    Occupied,
}

impl SeatStatus {
    /// Cell content used by the text occupancy map.
    pub fn symbol(&self) -> char {
        match self {
            Self::Free => ' ',
            Self::Occupied => 'X',
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied)
    }
}
