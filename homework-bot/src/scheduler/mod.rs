//! Scheduler layer
//!
//! Drives the fixed-interval poll loop: fetch, validate, decide, notify,
//! sleep. It owns the poll cursor and the notification state.

pub mod poller;

pub use poller::{StatusPoller, current_timestamp};

#[cfg(test)]
pub(crate) mod test_support;
