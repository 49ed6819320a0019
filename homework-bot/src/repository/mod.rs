//! Repository layer
//!
//! Repositories abstract communication with the two remote services behind
//! traits, so the poller can be exercised with in-memory fakes. The HTTP
//! implementations are the clients from `homework-client`.

mod homeworks;
mod messages;

pub use homeworks::HomeworkRepository;
pub use messages::MessageRepository;
