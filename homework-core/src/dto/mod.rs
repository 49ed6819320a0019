//! DTOs for external API communication

pub mod telegram;
