//! Configuration for the annotation engine.

use serde::{Deserialize, Serialize};

use crate::annotate::session::AnnotationScope;
use crate::error::{Error, Result};

/// Default annotation format: translation followed by the original term in
/// full-width parentheses.
pub const DEFAULT_TERM_FORMAT: &str = "{translation}（{original}）";

/// Configuration for term annotation and the post-annotation normalizer.
///
/// All fields have defaults, so configs deserialize from partial JSON
/// objects; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Annotate first occurrences with the original-language term
    pub add_source_terms: bool,

    /// Format template for annotations. Must contain both a
    /// `{translation}` and an `{original}` placeholder.
    pub term_format: String,

    /// Insert spaces at CJK/Latin boundaries after annotation
    pub spacing_adjustment: bool,

    /// Normalize line endings and cap vertical whitespace
    pub preserve_line_breaks: bool,

    /// Minimum original-term length (in characters) for annotation.
    /// Shorter terms are filtered entirely.
    pub min_term_length: usize,

    /// Maximum annotations per unique term within one session
    pub max_annotations_per_term: u32,

    /// Match translated terms case-sensitively
    pub case_sensitive: bool,

    /// First-occurrence scope: per text (local) or caller-managed (global)
    pub scope: AnnotationScope,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            add_source_terms: true,
            term_format: DEFAULT_TERM_FORMAT.to_string(),
            spacing_adjustment: true,
            preserve_line_breaks: true,
            min_term_length: 2,
            max_annotations_per_term: 1,
            case_sensitive: false,
            scope: AnnotationScope::Local,
        }
    }
}

impl AnnotationConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a JSON object; absent fields keep their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_gloss::annotate::AnnotationConfig;
    ///
    /// let config = AnnotationConfig::from_json(r#"{"min_term_length": 3}"#).unwrap();
    /// assert_eq!(config.min_term_length, 3);
    /// assert!(config.add_source_terms);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Set whether source-term annotations are added.
    pub fn with_source_terms(mut self, enabled: bool) -> Self {
        self.add_source_terms = enabled;
        self
    }

    /// Set the annotation format template.
    pub fn with_term_format(mut self, format: impl Into<String>) -> Self {
        self.term_format = format.into();
        self
    }

    /// Set whether CJK/Latin spacing adjustment runs after annotation.
    pub fn with_spacing_adjustment(mut self, enabled: bool) -> Self {
        self.spacing_adjustment = enabled;
        self
    }

    /// Set whether line-break normalization runs after annotation.
    pub fn with_line_break_normalization(mut self, enabled: bool) -> Self {
        self.preserve_line_breaks = enabled;
        self
    }

    /// Set the minimum original-term length for annotation.
    pub fn with_min_term_length(mut self, length: usize) -> Self {
        self.min_term_length = length;
        self
    }

    /// Set the per-term annotation cap for a session.
    pub fn with_max_annotations_per_term(mut self, max: u32) -> Self {
        self.max_annotations_per_term = max;
        self
    }

    /// Set case-sensitive term matching.
    pub fn with_case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Set the first-occurrence scope.
    pub fn with_scope(mut self, scope: AnnotationScope) -> Self {
        self.scope = scope;
        self
    }
}
