//! Session state for first-occurrence tracking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Scope across which "first occurrence" of a term is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationScope {
    /// Reset per `process` call: each text gets its own first occurrences
    /// (the default).
    #[default]
    Local,

    /// Session persists across `process` calls until the caller resets it,
    /// giving cross-page first-occurrence semantics. Concurrent use of a
    /// shared engine requires external mutual exclusion around each call.
    Global,
}

/// Per-session record of how many annotations each term has received.
///
/// Owned by an [`Annotator`](crate::annotate::Annotator); exposed so callers
/// can inspect statistics or reset between documents.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSession {
    counts: HashMap<String, u32>,
}

impl AnnotationSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of annotations recorded for a term in this session.
    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Record one annotation for a term.
    pub(crate) fn record(&mut self, term: &str) {
        *self.counts.entry(term.to_string()).or_insert(0) += 1;
    }

    /// Clear all recorded annotations, starting a fresh session.
    pub fn reset(&mut self) {
        self.counts.clear();
    }

    /// Per-term annotation counts recorded so far.
    pub fn stats(&self) -> &HashMap<String, u32> {
        &self.counts
    }
}
