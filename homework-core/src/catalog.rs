//! Status catalog
//!
//! Static mapping from raw review status codes to verdict sentences.

use crate::error::UnknownStatus;

/// Verdict sentences keyed by raw status code
const VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

/// Stateless lookup of verdict sentences
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCatalog;

impl StatusCatalog {
    /// Returns the verdict sentence for `status`
    pub fn describe(status: &str) -> Result<&'static str, UnknownStatus> {
        VERDICTS
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, verdict)| *verdict)
            .ok_or_else(|| UnknownStatus(status.to_string()))
    }

    /// Returns the verdict sentence, or a non-empty fallback naming the raw code
    pub fn describe_or_fallback(status: &str) -> String {
        match Self::describe(status) {
            Ok(verdict) => verdict.to_string(),
            Err(UnknownStatus(code)) => format!("Неизвестный статус проверки: \"{}\".", code),
        }
    }
}
