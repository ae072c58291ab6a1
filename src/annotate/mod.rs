//! First-occurrence term annotation for translated text.
//!
//! The annotation engine locates translated occurrences of extracted
//! technical terms inside machine-translated text and splices a formatted
//! gloss (translation + original-language term) into the first qualifying
//! occurrence of each term:
//!
//! ```text
//! translated text + term map
//!     ↓
//! [Annotator] (longest-translation-first matching, overlap resolution)
//!     ↓
//! annotated text
//!     ↓
//! [normalize] (CJK/Latin spacing, line-break normalization)
//!     ↓
//! AnnotationResult
//! ```
//!
//! Key guarantees:
//! - At most one annotation per term per session (configurable cap).
//! - Inserted annotation spans never overlap.
//! - Longer translated strings claim text before shorter, overlapping ones.
//! - Failure paths return the original input verbatim, never a
//!   partially-annotated text.

pub mod batch;
pub mod config;
pub mod engine;
pub mod session;
pub mod template;

// Re-export main types
pub use batch::BatchAnnotator;
pub use config::{AnnotationConfig, DEFAULT_TERM_FORMAT};
pub use engine::{AnnotatedSpan, AnnotationRequest, AnnotationResult, Annotator};
pub use session::{AnnotationScope, AnnotationSession};
pub use template::AnnotationTemplate;
