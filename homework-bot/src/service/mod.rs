//! Service layer
//!
//! Business logic on top of the repositories.

mod notifier;

pub use notifier::Notifier;
