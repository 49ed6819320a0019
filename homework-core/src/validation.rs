//! Response validation
//!
//! Enforces the expected shape of a poll response and extracts the newest
//! submission. An empty `homeworks` list is a normal outcome (`Ok(None)`),
//! distinct from a malformed payload.

use serde_json::Value as JsonValue;

use crate::domain::submission::{PollResponse, SubmissionRecord};
use crate::error::ValidationError;

const HOMEWORKS_KEY: &str = "homeworks";
const NAME_FIELD: &str = "homework_name";
const STATUS_FIELD: &str = "status";

/// Stateless validator for poll responses
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseValidator;

impl ResponseValidator {
    /// Extracts the most recent submission from `response`
    ///
    /// The server lists submissions newest-first, so only the head of the
    /// list is considered.
    pub fn extract(response: &PollResponse) -> Result<Option<SubmissionRecord>, ValidationError> {
        let body = response
            .body()
            .as_object()
            .ok_or(ValidationError::NotAMapping)?;

        let homeworks = body
            .get(HOMEWORKS_KEY)
            .and_then(JsonValue::as_array)
            .ok_or(ValidationError::MissingKey(HOMEWORKS_KEY))?;

        let Some(newest) = homeworks.first() else {
            return Ok(None);
        };

        let name = required_field(newest, NAME_FIELD)?;
        let status = required_field(newest, STATUS_FIELD)?;

        Ok(Some(SubmissionRecord::new(name, status)))
    }
}

/// Reads a non-empty string field from a submission entry
fn required_field<'a>(
    entry: &'a JsonValue,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    entry
        .get(field)
        .and_then(JsonValue::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::IncompleteRecord(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(body: JsonValue) -> Result<Option<SubmissionRecord>, ValidationError> {
        ResponseValidator::extract(&PollResponse::new(body))
    }

    #[test]
    fn test_empty_homeworks_is_not_an_error() {
        assert_eq!(extract(json!({"homeworks": [], "current_date": 1})), Ok(None));
    }

    #[test]
    fn test_missing_homeworks_key() {
        assert_eq!(
            extract(json!({"current_date": 1})),
            Err(ValidationError::MissingKey("homeworks"))
        );
    }

    #[test]
    fn test_homeworks_not_a_list() {
        assert_eq!(
            extract(json!({"homeworks": {"homework_name": "hw1"}})),
            Err(ValidationError::MissingKey("homeworks"))
        );
    }

    #[test]
    fn test_non_mapping_payload() {
        assert_eq!(extract(json!([1, 2, 3])), Err(ValidationError::NotAMapping));
        assert_eq!(extract(json!("homeworks")), Err(ValidationError::NotAMapping));
        assert_eq!(extract(JsonValue::Null), Err(ValidationError::NotAMapping));
    }

    #[test]
    fn test_selects_head_of_list() {
        let record = extract(json!({
            "homeworks": [
                {"homework_name": "hw2", "status": "reviewing"},
                {"homework_name": "hw1", "status": "approved"}
            ]
        }))
        .unwrap();
        assert_eq!(record, Some(SubmissionRecord::new("hw2", "reviewing")));
    }

    #[test]
    fn test_incomplete_record_names_missing_field() {
        assert_eq!(
            extract(json!({"homeworks": [{"status": "approved"}]})),
            Err(ValidationError::IncompleteRecord("homework_name"))
        );
        assert_eq!(
            extract(json!({"homeworks": [{"homework_name": "hw1"}]})),
            Err(ValidationError::IncompleteRecord("status"))
        );
        assert_eq!(
            extract(json!({"homeworks": [{"homework_name": "", "status": "approved"}]})),
            Err(ValidationError::IncompleteRecord("homework_name"))
        );
    }

    #[test]
    fn test_only_head_is_validated() {
        let record = extract(json!({
            "homeworks": [
                {"homework_name": "hw2", "status": "approved"},
                {"broken": true}
            ]
        }))
        .unwrap();
        assert_eq!(record, Some(SubmissionRecord::new("hw2", "approved")));
    }
}
