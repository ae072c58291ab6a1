//! Error types for the translation post-processing library.
//!
//! This module defines all error types that can occur during term annotation,
//! layout analysis, and pipeline orchestration.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during translation post-processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Translated text was missing (null upstream input)
    #[error("Translated text is missing")]
    MissingInput,

    /// Annotation format template is malformed
    #[error("Invalid annotation template '{template}': {reason}")]
    InvalidTemplate {
        /// The offending template string
        template: String,
        /// Reason the template was rejected
        reason: String,
    },

    /// A term search pattern could not be compiled
    #[error("Invalid term pattern: {0}")]
    InvalidTermPattern(String),

    /// Layout analysis failed for a page
    #[error("Layout analysis failed: {0}")]
    Layout(String),

    /// Translation backend reported a failure
    #[error("Translation failed: {0}")]
    Translation(String),

    /// Term extraction collaborator reported a failure
    #[error("Term extraction failed: {0}")]
    TermExtraction(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
