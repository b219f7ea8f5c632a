//! Presentation shell for seatbook: configuration, HTTP API and CLI wiring around
//! [`seatbook_core`].

pub mod api;
pub mod config;

/// Format of day keys produced by the shell. The core treats days as opaque text.
pub const DAY_FORMAT: &str = "%d/%m/%Y";

/// Today's date in [`DAY_FORMAT`], the default day for every command.
pub fn today() -> String {
    chrono::Local::now().format(DAY_FORMAT).to_string()
}
