use std::collections::HashMap;

use crate::types::TranscriptOutcome;

/// In-memory transcript lookups keyed by the raw URL the user typed.
///
/// Owned by a session and dropped (or cleared) with it; there is no eviction.
#[derive(Debug, Default)]
pub struct TranscriptCache {
    entries: HashMap<String, TranscriptOutcome>,
}

impl TranscriptCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&TranscriptOutcome> {
        self.entries.get(url)
    }

    /// Store an outcome. Failures are not remembered so that triggering the
    /// action again reaches the captions provider.
    pub fn insert(&mut self, url: &str, outcome: &TranscriptOutcome) {
        if matches!(outcome, TranscriptOutcome::Failed(_)) {
            return;
        }
        self.entries.insert(url.to_string(), outcome.clone());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
