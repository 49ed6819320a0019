//! Message formatting
//!
//! Builds the user-facing text sent through the messenger. Verdict lookup is
//! left to [`StatusCatalog`].

use crate::catalog::StatusCatalog;
use crate::domain::submission::SubmissionRecord;

/// Longest text the messenger accepts, in characters
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Text announcing a status change of `record`
///
/// Unrecognized status codes still produce a message, with a fallback verdict.
pub fn status_changed(record: &SubmissionRecord) -> String {
    format!(
        "Изменился статус проверки работы \"{}\". {}",
        record.name,
        StatusCatalog::describe_or_fallback(&record.status)
    )
}

/// Text reporting a failed poll cycle, cut to [`MAX_MESSAGE_CHARS`]
pub fn cycle_failed(error: &dyn std::fmt::Display) -> String {
    truncate(format!("Сбой в работе программы: {}", error))
}

fn truncate(text: String) -> String {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return text;
    }

    let mut cut: String = text.chars().take(MAX_MESSAGE_CHARS - 1).collect();
    cut.push('…');
    cut
}
