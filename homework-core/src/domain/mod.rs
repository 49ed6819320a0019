//! Domain types
//!
//! Business entities shared between the HTTP clients and the poll loop.

pub mod cursor;
pub mod submission;
