//! Batch drivers over the annotation engine.

use crate::annotate::config::AnnotationConfig;
use crate::annotate::engine::{AnnotationResult, Annotator};
use crate::annotate::session::AnnotationScope;
use crate::terms::TermMap;

/// Processes multiple texts through the annotation engine.
///
/// `process_batch` gives every text its own first occurrences;
/// `process_pages` shares one session across all pages so each term is
/// glossed only the first time it appears in the document.
#[derive(Debug, Default)]
pub struct BatchAnnotator {
    config: AnnotationConfig,
}

impl BatchAnnotator {
    /// Create a batch annotator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a batch annotator with a custom configuration.
    pub fn with_config(config: AnnotationConfig) -> Self {
        Self { config }
    }

    /// Process independent texts, each with its own term map and a fresh
    /// first-occurrence session.
    pub fn process_batch(&self, texts_and_terms: &[(String, TermMap)]) -> Vec<AnnotationResult> {
        let config = self.config.clone().with_scope(AnnotationScope::Local);
        let mut annotator = Annotator::with_config(config);

        texts_and_terms
            .iter()
            .map(|(text, terms)| {
                annotator.reset_session();
                annotator.process(text, terms)
            })
            .collect()
    }

    /// Process a document's pages against a shared term map with
    /// document-wide first-occurrence tracking.
    pub fn process_pages(&self, pages: &[String], global_terms: &TermMap) -> Vec<AnnotationResult> {
        let config = self.config.clone().with_scope(AnnotationScope::Global);
        let mut annotator = Annotator::with_config(config);

        pages
            .iter()
            .map(|page_text| annotator.process(page_text, global_terms))
            .collect()
    }
}
