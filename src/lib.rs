//! # pdf_gloss
//!
//! Layout-preserving PDF translation post-processing.
//!
//! This crate is the post-processing core of a PDF translation system: it
//! takes machine-translated text plus a technical-term glossary and splices
//! source-language glosses into the first occurrence of each term, then
//! normalizes mixed-script spacing and line breaks. A rule-based layout
//! classifier supplies region types (title, list, header, footer, figure,
//! table) and column counts that drive rendering and figure/table
//! exclusion.
//!
//! ## Core Features
//!
//! - **Term annotation**: at most one gloss per term per session, longer
//!   translations claim overlapping text first, inserted spans never
//!   overlap, failure paths return the input verbatim
//! - **Sessions**: per-text (local) or document-wide (global)
//!   first-occurrence tracking with explicit reset
//! - **Normalization**: CJK/Latin boundary spacing, plain-space collapsing
//!   (tabs and newlines untouched), line-ending and paragraph-break
//!   normalization
//! - **Layout analysis**: list/title/header/footer precedence rules,
//!   column detection from block geometry, per-page degradation to an
//!   empty fallback on malformed input
//! - **Pipeline**: trait seams for the translation and term-mining
//!   collaborators, figure/table block masking, degrade-don't-abort error
//!   policy throughout
//!
//! Extraction, OCR, machine translation, term mining, and rendering are
//! external collaborators; this crate only consumes their resolved
//! outputs.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_gloss::annotate::Annotator;
//! use pdf_gloss::terms::TermMap;
//!
//! let mut annotator = Annotator::new();
//! let mut terms = TermMap::new();
//! terms.insert("machine learning".to_string(), "機械学習".to_string());
//!
//! let result = annotator.process("機械学習について説明します。", &terms);
//! assert!(result.success);
//! assert_eq!(
//!     result.processed_text,
//!     "機械学習（machine learning）について説明します。"
//! );
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry and page model
pub mod geometry;
pub mod page;

// Term store
pub mod terms;

// Annotation engine and normalizer
pub mod annotate;
pub mod normalize;

// Layout classification
pub mod layout;

// Document orchestration
pub mod pipeline;

// Re-export the main public surface
pub use annotate::{
    AnnotationConfig, AnnotationRequest, AnnotationResult, AnnotationScope, AnnotationSession,
    Annotator, BatchAnnotator,
};
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use layout::{
    detect_columns, LayoutAnalysisResult, LayoutAnalyzer, LayoutConfig, Region, RegionType,
};
pub use page::{ImageRef, Page, TextBlock};
pub use pipeline::{
    DocumentAnalysis, PipelineConfig, PipelineSummary, TermProvider, TranslatedDocument,
    TranslatedPage, TranslationPipeline, Translator,
};
pub use terms::{Term, TermExtractionResult, TermMap};
