//! Error types for response validation and status lookup

use thiserror::Error;

/// Shape violations in a decoded poll response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The payload is not a JSON object
    #[error("API response is not a JSON object")]
    NotAMapping,

    /// A required top-level key is absent or has the wrong type
    #[error("API response has no `{0}` list")]
    MissingKey(&'static str),

    /// The newest submission lacks a required field
    #[error("submission entry is missing `{0}`")]
    IncompleteRecord(&'static str),
}

/// A review status code the catalog has no verdict for
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown homework status `{0}`")]
pub struct UnknownStatus(pub String);
