//! Technical term records and the term translation map.
//!
//! Term mining (entity extraction, gloss lookup) is an external collaborator;
//! it hands results over as a [`TermExtractionResult`] whose `terms` field is
//! always a list of structured [`Term`] records. The annotation engine
//! consumes the flattened [`TermMap`] form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Mapping from original-language term to its target-language translation.
///
/// Insertion order is preserved, which makes the annotation engine's
/// equal-length tie-break deterministic for a given map construction order.
pub type TermMap = IndexMap<String, String>;

/// An original-language technical expression paired with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Original-language surface form
    pub text: String,
    /// Target-language surface form
    pub translation: String,
}

impl Term {
    /// Create a new term record.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_gloss::terms::Term;
    ///
    /// let term = Term::new("machine learning", "機械学習");
    /// assert_eq!(term.text, "machine learning");
    /// assert_eq!(term.translation, "機械学習");
    /// ```
    pub fn new(text: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            translation: translation.into(),
        }
    }
}

/// Result of a term extraction pass over document text.
///
/// The `terms` field is always a list; collaborators returning per-page or
/// per-document results use the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermExtractionResult {
    /// Extracted terms with their translations
    pub terms: Vec<Term>,
}

impl TermExtractionResult {
    /// Create an empty extraction result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether any terms were extracted.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of extracted terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Flatten into the original → translation map consumed by the
    /// annotation engine. Later duplicates of the same original term
    /// overwrite earlier ones.
    pub fn to_term_map(&self) -> TermMap {
        self.terms
            .iter()
            .map(|term| (term.text.clone(), term.translation.clone()))
            .collect()
    }
}

impl FromIterator<Term> for TermExtractionResult {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}
