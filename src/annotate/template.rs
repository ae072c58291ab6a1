//! Annotation format templates.

use crate::error::{Error, Result};

/// Placeholder substituted with the translated term.
const TRANSLATION_PLACEHOLDER: &str = "{translation}";

/// Placeholder substituted with the original-language term.
const ORIGINAL_PLACEHOLDER: &str = "{original}";

/// A validated annotation format template.
///
/// Templates are validated before the engine mutates any text, so a
/// malformed template can never produce a partially-annotated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationTemplate {
    format: String,
}

impl AnnotationTemplate {
    /// Validate a format string into a usable template.
    ///
    /// A template must contain both the `{translation}` and `{original}`
    /// placeholders.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_gloss::annotate::AnnotationTemplate;
    ///
    /// let template = AnnotationTemplate::parse("{translation}（{original}）").unwrap();
    /// assert_eq!(template.render("機械学習", "machine learning"), "機械学習（machine learning）");
    ///
    /// assert!(AnnotationTemplate::parse("{translation} only").is_err());
    /// ```
    pub fn parse(format: &str) -> Result<Self> {
        for placeholder in [TRANSLATION_PLACEHOLDER, ORIGINAL_PLACEHOLDER] {
            if !format.contains(placeholder) {
                return Err(Error::InvalidTemplate {
                    template: format.to_string(),
                    reason: format!("missing {} placeholder", placeholder),
                });
            }
        }
        Ok(Self {
            format: format.to_string(),
        })
    }

    /// Render the annotation text for one term.
    pub fn render(&self, translation: &str, original: &str) -> String {
        self.format
            .replace(TRANSLATION_PLACEHOLDER, translation)
            .replace(ORIGINAL_PLACEHOLDER, original)
    }
}
