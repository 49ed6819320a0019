//! Submission domain types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One homework submission as reported by the review API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "homework_name")]
    pub name: String,
    pub status: String,
}

impl SubmissionRecord {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }
}

/// Raw decoded payload of one poll
///
/// The payload is kept untyped so that shape problems surface as
/// validation errors instead of a generic decode failure.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResponse {
    body: JsonValue,
}

impl PollResponse {
    pub fn new(body: JsonValue) -> Self {
        Self { body }
    }

    /// The decoded JSON body
    pub fn body(&self) -> &JsonValue {
        &self.body
    }

    /// Server time reported with the response (`current_date`)
    ///
    /// Returns `None` when the field is absent, negative or not an integer.
    pub fn current_date(&self) -> Option<u64> {
        self.body.get("current_date").and_then(JsonValue::as_u64)
    }
}

impl From<JsonValue> for PollResponse {
    fn from(body: JsonValue) -> Self {
        Self::new(body)
    }
}
