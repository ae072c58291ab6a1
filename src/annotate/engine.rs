//! The term annotation engine.
//!
//! Implements the first-occurrence matching pass: terms are processed
//! longest-translation-first, each accepted match is spliced with the
//! rendered annotation, and the span of the inserted text is recorded so
//! later, shorter terms cannot re-annotate text already claimed.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::annotate::config::AnnotationConfig;
use crate::annotate::session::{AnnotationScope, AnnotationSession};
use crate::annotate::template::AnnotationTemplate;
use crate::error::{Error, Result};
use crate::normalize;
use crate::terms::{Term, TermMap};

/// A half-open byte span of the working text already consumed by an
/// inserted annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatedSpan {
    /// Start offset (inclusive) in the working text
    pub start: usize,
    /// End offset (exclusive) in the working text
    pub end: usize,
}

impl AnnotatedSpan {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Check whether a candidate match at `start..end` overlaps this span.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        !(end <= self.start || start >= self.end)
    }
}

/// An annotation request as it crosses the pipeline boundary.
///
/// `translated_text` is optional because upstream collaborators may hand
/// over null output; that case is the engine's invalid-input failure path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationRequest {
    /// The machine-translated text to annotate, if any was produced
    pub translated_text: Option<String>,
    /// Mapping from original term to translated term
    #[serde(default)]
    pub term_translations: TermMap,
}

/// Result of one annotation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationResult {
    /// The annotated (and normalized) text; on failure, the original input
    /// verbatim
    pub processed_text: String,
    /// Whether the pass completed
    pub success: bool,
    /// Failure description when `success` is false
    pub error: Option<String>,
    /// Number of annotations inserted
    pub annotations_added: usize,
    /// Number of terms supplied to the pass
    pub terms_processed: usize,
}

impl AnnotationResult {
    fn annotated(processed_text: String, annotations_added: usize, terms_processed: usize) -> Self {
        Self {
            processed_text,
            success: true,
            error: None,
            annotations_added,
            terms_processed,
        }
    }

    fn failed(original_text: &str, error: Error) -> Self {
        Self {
            processed_text: original_text.to_string(),
            success: false,
            error: Some(error.to_string()),
            annotations_added: 0,
            terms_processed: 0,
        }
    }
}

/// The annotation engine.
///
/// Owns its session state; with the default local scope every `process`
/// call starts fresh, while [`AnnotationScope::Global`] lets first
/// occurrences span multiple texts until [`reset_session`](Self::reset_session)
/// is called.
///
/// # Examples
///
/// ```
/// use pdf_gloss::annotate::Annotator;
/// use pdf_gloss::terms::TermMap;
///
/// let mut annotator = Annotator::new();
/// let mut terms = TermMap::new();
/// terms.insert("machine learning".to_string(), "機械学習".to_string());
///
/// let result = annotator.process("機械学習について説明します。", &terms);
/// assert!(result.success);
/// assert!(result.processed_text.contains("機械学習（machine learning）"));
/// ```
#[derive(Debug, Default)]
pub struct Annotator {
    config: AnnotationConfig,
    session: AnnotationSession,
}

impl Annotator {
    /// Create an annotator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an annotator with a custom configuration.
    pub fn with_config(config: AnnotationConfig) -> Self {
        Self {
            config,
            session: AnnotationSession::new(),
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    /// Get the current session state.
    pub fn session(&self) -> &AnnotationSession {
        &self.session
    }

    /// Per-term annotation counts recorded in the current session.
    pub fn annotation_stats(&self) -> &std::collections::HashMap<String, u32> {
        self.session.stats()
    }

    /// Clear the session, starting first-occurrence tracking afresh.
    pub fn reset_session(&mut self) {
        self.session.reset();
    }

    /// Annotate first occurrences of translated terms in `translated_text`.
    ///
    /// An empty term map is a no-op: the text passes through the normalizer
    /// flags only. Terms whose translation is absent from the text, or whose
    /// every occurrence overlaps an earlier annotation, are skipped silently.
    /// On failure the returned result carries the input text verbatim.
    pub fn process(&mut self, translated_text: &str, terms: &TermMap) -> AnnotationResult {
        if self.config.scope == AnnotationScope::Local {
            self.session.reset();
        }

        let terms_processed = terms.len();
        let mut working = translated_text.to_string();
        let mut annotations_added = 0;

        if self.config.add_source_terms && !terms.is_empty() {
            // Validate the template before touching the text, so a bad
            // template can never yield a partially-annotated result.
            let template = match AnnotationTemplate::parse(&self.config.term_format) {
                Ok(template) => template,
                Err(e) => {
                    log::error!("Annotation pass failed: {}", e);
                    return AnnotationResult::failed(translated_text, e);
                },
            };

            match self.annotate_terms(&mut working, terms, &template) {
                Ok(added) => annotations_added = added,
                Err(e) => {
                    log::error!("Annotation pass failed: {}", e);
                    return AnnotationResult::failed(translated_text, e);
                },
            }
        }

        if self.config.spacing_adjustment {
            working = normalize::adjust_spacing(&working);
        }
        if self.config.preserve_line_breaks {
            working = normalize::normalize_line_breaks(&working);
        }

        AnnotationResult::annotated(working, annotations_added, terms_processed)
    }

    /// Process a request from an upstream collaborator.
    ///
    /// Missing translated text is the invalid-input failure: the result
    /// carries an empty string and a descriptive error.
    pub fn process_request(&mut self, request: &AnnotationRequest) -> AnnotationResult {
        match request.translated_text.as_deref() {
            Some(text) => self.process(text, &request.term_translations),
            None => AnnotationResult::failed("", Error::MissingInput),
        }
    }

    /// Annotate using structured term records instead of a prebuilt map.
    pub fn process_with_terms(&mut self, translated_text: &str, terms: &[Term]) -> AnnotationResult {
        let map: TermMap = terms
            .iter()
            .map(|term| (term.text.clone(), term.translation.clone()))
            .collect();
        self.process(translated_text, &map)
    }

    /// Run the matching pass over the working text.
    ///
    /// Returns the number of annotations inserted. The working text is
    /// rescanned live after each splice: insertion shifts every later
    /// offset, so cached positions from the original input would be stale.
    fn annotate_terms(
        &mut self,
        working: &mut String,
        terms: &TermMap,
        template: &AnnotationTemplate,
    ) -> Result<usize> {
        let mut ordered: Vec<(&str, &str)> = terms
            .iter()
            .map(|(original, translated)| (original.as_str(), translated.as_str()))
            .collect();
        // Longest translation first, so specific terms claim their text
        // before shorter terms that are substrings of them. The sort is
        // stable: equal lengths keep the map's insertion order.
        ordered.sort_by(|a, b| b.1.chars().count().cmp(&a.1.chars().count()));

        let mut claimed: Vec<AnnotatedSpan> = Vec::new();
        let mut added = 0;

        for (original, translated) in ordered {
            if translated.trim().is_empty() {
                continue;
            }
            if original.chars().count() < self.config.min_term_length {
                continue;
            }
            if self.session.count(original) >= self.config.max_annotations_per_term {
                continue;
            }

            let pattern = build_term_pattern(translated, self.config.case_sensitive)?;
            let Some((start, end)) = first_free_match(&pattern, working, &claimed) else {
                continue;
            };

            let annotation = template.render(translated, original);
            working.replace_range(start..end, &annotation);
            claimed.push(AnnotatedSpan::new(start, start + annotation.len()));
            self.session.record(original);
            added += 1;
        }

        Ok(added)
    }
}

/// Build the literal search pattern for a translated term.
fn build_term_pattern(translated: &str, case_sensitive: bool) -> Result<Regex> {
    RegexBuilder::new(&regex::escape(translated))
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| Error::InvalidTermPattern(format!("{:?}: {}", translated, e)))
}

/// Find the first occurrence, scanning left to right, whose span overlaps
/// no previously claimed annotation span.
fn first_free_match(
    pattern: &Regex,
    text: &str,
    claimed: &[AnnotatedSpan],
) -> Option<(usize, usize)> {
    pattern
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .find(|&(start, end)| !claimed.iter().any(|span| span.overlaps(start, end)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn term_map(pairs: &[(&str, &str)]) -> TermMap {
        pairs
            .iter()
            .map(|(original, translated)| (original.to_string(), translated.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_annotation() {
        let mut annotator = Annotator::new();
        let terms = term_map(&[("machine learning", "機械学習")]);

        let result = annotator.process("これは機械学習に関する文書です。", &terms);

        assert!(result.success);
        assert!(result.processed_text.contains("機械学習（machine learning）"));
        assert_eq!(result.annotations_added, 1);
        assert_eq!(result.terms_processed, 1);
    }

    #[test]
    fn test_multiple_terms_annotated() {
        let mut annotator = Annotator::new();
        let terms = term_map(&[
            ("machine learning", "機械学習"),
            ("deep learning", "深層学習"),
            ("artificial intelligence", "人工知能"),
        ]);

        let result = annotator.process(
            "機械学習は人工知能の一分野です。深層学習も重要な技術です。",
            &terms,
        );

        assert!(result.success);
        assert!(result.processed_text.contains("機械学習（machine learning）"));
        assert!(result.processed_text.contains("深層学習（deep learning）"));
        assert!(result
            .processed_text
            .contains("人工知能（artificial intelligence）"));
        assert_eq!(result.annotations_added, 3);
    }

    #[test]
    fn test_first_occurrence_only() {
        let mut annotator = Annotator::new();
        let terms = term_map(&[("machine learning", "機械学習")]);

        let result = annotator.process("機械学習について説明します。機械学習は重要です。", &terms);

        let annotated = result
            .processed_text
            .matches("機械学習（machine learning）")
            .count();
        let total = result.processed_text.matches("機械学習").count();
        assert_eq!(annotated, 1);
        assert_eq!(total - annotated, 1);
    }

    #[test]
    fn test_longer_translation_wins_overlap() {
        let mut annotator = Annotator::new();
        let terms = term_map(&[
            ("natural language", "自然言語"),
            ("natural language processing", "自然言語処理"),
        ]);

        let result = annotator.process("自然言語処理システムについて", &terms);

        assert!(result
            .processed_text
            .contains("自然言語処理（natural language processing）"));
        assert!(!result
            .processed_text
            .contains("自然言語（natural language）処理"));
        assert_eq!(result.annotations_added, 1);
    }

    #[test]
    fn test_overlapped_term_still_annotates_elsewhere() {
        let mut annotator = Annotator::new();
        let terms = term_map(&[
            ("natural language", "自然言語"),
            ("natural language processing", "自然言語処理"),
        ]);

        // Second occurrence of 自然言語 is free-standing; the shorter term
        // must skip the claimed prefix and annotate there instead.
        let result = annotator.process("自然言語処理と自然言語の研究", &terms);

        assert!(result
            .processed_text
            .contains("自然言語処理（natural language processing）"));
        assert!(result.processed_text.contains("自然言語（natural language）"));
        assert_eq!(result.annotations_added, 2);
    }

    #[test]
    fn test_min_term_length_filter() {
        let config = AnnotationConfig::new().with_min_term_length(10);
        let mut annotator = Annotator::with_config(config);
        let terms = term_map(&[("AI", "AI"), ("machine learning", "機械学習")]);

        let result = annotator.process("AIと機械学習について説明します。", &terms);

        assert!(!result.processed_text.contains("AI（AI）"));
        assert!(result.processed_text.contains("機械学習（machine learning）"));
    }

    #[test]
    fn test_case_insensitive_latin_match_uses_canonical_translation() {
        let mut annotator = Annotator::new();
        let terms = term_map(&[("application programming interface", "API")]);

        let result = annotator.process("Restful Api design", &terms);

        assert!(result
            .processed_text
            .contains("API（application programming interface）"));
    }

    #[test]
    fn test_case_sensitive_match() {
        let config = AnnotationConfig::new().with_case_sensitive(true);
        let mut annotator = Annotator::with_config(config);
        let terms = term_map(&[("application programming interface", "API")]);

        let result = annotator.process("Restful Api design", &terms);

        assert_eq!(result.annotations_added, 0);
        assert!(!result.processed_text.contains("（"));
    }

    #[test]
    fn test_custom_format() {
        let config = AnnotationConfig::new().with_term_format("{translation} [{original}]");
        let mut annotator = Annotator::with_config(config);
        let terms = term_map(&[("machine learning", "機械学習")]);

        let result = annotator.process("機械学習について", &terms);

        assert!(result.processed_text.contains("機械学習 [machine learning]"));
    }

    #[test]
    fn test_source_terms_disabled() {
        let config = AnnotationConfig::new().with_source_terms(false);
        let mut annotator = Annotator::with_config(config);
        let terms = term_map(&[("machine learning", "機械学習")]);

        let text = "機械学習について説明します。";
        let result = annotator.process(text, &terms);

        assert!(result.success);
        assert_eq!(result.processed_text, text);
        assert_eq!(result.annotations_added, 0);
    }

    #[test]
    fn test_empty_term_map_is_noop() {
        let mut annotator = Annotator::new();
        let result = annotator.process("機械学習について説明します。", &TermMap::new());

        assert!(result.success);
        assert_eq!(result.processed_text, "機械学習について説明します。");
        assert_eq!(result.terms_processed, 0);
    }

    #[test]
    fn test_empty_text() {
        let mut annotator = Annotator::new();
        let terms = term_map(&[("machine learning", "機械学習")]);

        let result = annotator.process("", &terms);

        assert!(result.success);
        assert_eq!(result.processed_text, "");
        assert_eq!(result.annotations_added, 0);
    }

    #[test]
    fn test_whitespace_translation_skipped() {
        let mut annotator = Annotator::new();
        let terms = term_map(&[("machine learning", "  ")]);

        let result = annotator.process("機械学習について", &terms);

        assert!(result.success);
        assert_eq!(result.annotations_added, 0);
    }

    #[test]
    fn test_missing_input_fails() {
        let mut annotator = Annotator::new();
        let request = AnnotationRequest {
            translated_text: None,
            term_translations: TermMap::new(),
        };

        let result = annotator.process_request(&request);

        assert!(!result.success);
        assert_eq!(result.processed_text, "");
        assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn test_request_with_text_succeeds() {
        let mut annotator = Annotator::new();
        let request = AnnotationRequest {
            translated_text: Some("機械学習について".to_string()),
            term_translations: term_map(&[("machine learning", "機械学習")]),
        };

        let result = annotator.process_request(&request);

        assert!(result.success);
        assert!(result.processed_text.contains("機械学習（machine learning）"));
    }

    #[test]
    fn test_invalid_template_returns_original_text() {
        let config = AnnotationConfig::new().with_term_format("{translation} only");
        let mut annotator = Annotator::with_config(config);
        let terms = term_map(&[("machine learning", "機械学習")]);

        let text = "機械学習について";
        let result = annotator.process(text, &terms);

        assert!(!result.success);
        assert_eq!(result.processed_text, text);
        assert!(result.error.as_deref().unwrap().contains("{original}"));
    }

    #[test]
    fn test_invalid_template_with_empty_terms_succeeds() {
        // The template is only consulted when there are terms to annotate.
        let config = AnnotationConfig::new().with_term_format("broken");
        let mut annotator = Annotator::with_config(config);

        let result = annotator.process("some text", &TermMap::new());
        assert!(result.success);
    }

    #[test]
    fn test_statistics() {
        let mut annotator = Annotator::new();
        let terms = term_map(&[
            ("machine learning", "機械学習"),
            ("deep learning", "深層学習"),
        ]);

        let result = annotator.process("機械学習と深層学習について。機械学習は重要です。", &terms);

        assert!(result.success);
        assert_eq!(result.annotations_added, 2);
        assert_eq!(result.terms_processed, 2);
        assert_eq!(annotator.annotation_stats().len(), 2);
    }

    #[test]
    fn test_local_scope_resets_between_calls() {
        let mut annotator = Annotator::new();
        let terms = term_map(&[("machine learning", "機械学習")]);

        let first = annotator.process("機械学習について", &terms);
        let second = annotator.process("機械学習は重要です", &terms);

        assert_eq!(first.annotations_added, 1);
        assert_eq!(second.annotations_added, 1);
    }

    #[test]
    fn test_global_scope_tracks_across_calls() {
        let config = AnnotationConfig::new().with_scope(AnnotationScope::Global);
        let mut annotator = Annotator::with_config(config);
        let terms = term_map(&[("machine learning", "機械学習")]);

        let first = annotator.process("機械学習について", &terms);
        let second = annotator.process("機械学習は重要です", &terms);

        assert_eq!(first.annotations_added, 1);
        assert_eq!(second.annotations_added, 0);
        assert!(!second.processed_text.contains("（machine learning）"));

        annotator.reset_session();
        let third = annotator.process("機械学習の続き", &terms);
        assert_eq!(third.annotations_added, 1);
    }

    #[test]
    fn test_global_scope_respects_annotation_cap() {
        let config = AnnotationConfig::new()
            .with_scope(AnnotationScope::Global)
            .with_max_annotations_per_term(2);
        let mut annotator = Annotator::with_config(config);
        let terms = term_map(&[("machine learning", "機械学習")]);

        // One annotation per call; the cap of two is reached on the second.
        assert_eq!(annotator.process("機械学習 その一", &terms).annotations_added, 1);
        assert_eq!(annotator.process("機械学習 その二", &terms).annotations_added, 1);
        assert_eq!(annotator.process("機械学習 その三", &terms).annotations_added, 0);
    }

    #[test]
    fn test_process_with_terms() {
        let mut annotator = Annotator::new();
        let terms = vec![
            Term::new("machine learning", "機械学習"),
            Term::new("artificial intelligence", "人工知能"),
        ];

        let result = annotator.process_with_terms("機械学習と人工知能について", &terms);

        assert!(result.success);
        assert!(result.processed_text.contains("機械学習（machine learning）"));
        assert!(result
            .processed_text
            .contains("人工知能（artificial intelligence）"));
    }

    #[test]
    fn test_determinism() {
        let terms = term_map(&[
            ("natural language", "自然言語"),
            ("natural language processing", "自然言語処理"),
            ("machine learning", "機械学習"),
        ]);
        let text = "自然言語処理と機械学習と自然言語の話";

        let mut first = Annotator::new();
        let mut second = Annotator::new();
        assert_eq!(
            first.process(text, &terms).processed_text,
            second.process(text, &terms).processed_text
        );
    }

    #[test]
    fn test_span_overlap_predicate() {
        let span = AnnotatedSpan::new(10, 20);
        assert!(span.overlaps(15, 25));
        assert!(span.overlaps(5, 11));
        assert!(span.overlaps(10, 20));
        assert!(!span.overlaps(0, 10));
        assert!(!span.overlaps(20, 30));
    }

    proptest! {
        #[test]
        fn prop_at_most_one_annotation_per_term(text in "[ab機械学習 。\n]{0,60}") {
            let mut annotator = Annotator::new();
            let terms = term_map(&[("machine learning", "機械学習")]);

            let result = annotator.process(&text, &terms);
            prop_assert!(result.success);
            let annotated = result.processed_text.matches("機械学習（machine learning）").count();
            prop_assert!(annotated <= 1);
            prop_assert!(result.annotations_added <= 1);
        }

        #[test]
        fn prop_process_is_deterministic(text in "[自然言語処理 と。]{0,48}") {
            let terms = term_map(&[
                ("natural language", "自然言語"),
                ("natural language processing", "自然言語処理"),
            ]);

            let mut first = Annotator::new();
            let mut second = Annotator::new();
            let a = first.process(&text, &terms);
            let b = second.process(&text, &terms);
            prop_assert!(a.success && b.success);
            prop_assert_eq!(a.processed_text, b.processed_text);
            prop_assert_eq!(a.annotations_added, b.annotations_added);
        }
    }
}
