//! ANSI color helpers for roster output.

use crate::models::attendee::Status;

pub const RESET: &str = "\x1b[0m";
pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Status color: checked-in green, not-yet yellow, inactive grey.
pub fn color_for_status(status: Status) -> &'static str {
    match status {
        Status::CheckedIn => GREEN,
        Status::NotYet => YELLOW,
        Status::Inactive => GREY,
    }
}
