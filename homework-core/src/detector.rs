//! Change detection
//!
//! Tracks the last notified status per submission name and decides whether
//! a freshly observed record warrants a message.

use std::collections::HashMap;

use crate::domain::submission::SubmissionRecord;

/// Last notified status, keyed by submission name
///
/// Lives in memory only; a restart starts from an empty state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    statuses: HashMap<String, String>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last notified status for `name`
    pub fn status_of(&self, name: &str) -> Option<&str> {
        self.statuses.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

/// Pure comparison between an observation and the notification state
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector;

impl ChangeDetector {
    /// Returns whether `record` should be notified, and the state to keep
    ///
    /// True exactly when the name is unseen or its status differs from the
    /// last notified one. The returned state already reflects `record`.
    pub fn should_notify(
        record: &SubmissionRecord,
        mut state: NotificationState,
    ) -> (bool, NotificationState) {
        if state.status_of(&record.name) == Some(record.status.as_str()) {
            return (false, state);
        }

        state
            .statuses
            .insert(record.name.clone(), record.status.clone());
        (true, state)
    }
}
