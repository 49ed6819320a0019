//! Poll cursor
//!
//! Lower bound (epoch seconds) for the `from_date` of the next fetch.

use std::fmt;

/// Timestamp boundary for the next poll
///
/// Only moves forward: advancing to an older timestamp is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollCursor(u64);

impl PollCursor {
    pub fn new(timestamp: u64) -> Self {
        Self(timestamp)
    }

    pub fn timestamp(&self) -> u64 {
        self.0
    }

    /// Moves the cursor to `timestamp` unless that would move it backwards
    ///
    /// Returns `true` if the cursor changed.
    pub fn advance_to(&mut self, timestamp: u64) -> bool {
        if timestamp > self.0 {
            self.0 = timestamp;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for PollCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
