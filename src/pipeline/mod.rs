//! Document translation pipeline.
//!
//! Sequences the per-document flow across the collaborator seams:
//!
//! ```text
//! Page[] (from the extraction collaborator)
//!     ↓
//! [TermProvider] (document-level term mining)
//!     ↓
//! TermMap
//!     ↓                per page
//! [LayoutAnalyzer] ──► regions + figure/table masking
//!     ↓                per block
//! [Translator] ──► translated text
//!     ↓
//! [Annotator] ──► glossed text
//!     ↓
//! TranslatedDocument (consumed by the rendering collaborator)
//! ```
//!
//! Every collaborator failure degrades rather than aborts: term extraction
//! falls back to an empty map, a failed page analysis to the empty layout
//! result, a failed translation keeps the source text, and a failed
//! annotation pass keeps the unannotated translation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::annotate::{AnnotationConfig, Annotator};
use crate::error::Result;
use crate::layout::{LayoutAnalysisResult, LayoutAnalyzer, LayoutConfig, Region};
use crate::page::{Page, TextBlock};
use crate::terms::{TermExtractionResult, TermMap};

/// Machine-translation backend boundary.
///
/// Implementations perform whatever I/O they need (local model server,
/// hosted API); the pipeline only consumes the resolved string and applies
/// no timeout or retry policy of its own.
pub trait Translator {
    /// Translate one block of text.
    fn translate(&self, text: &str) -> Result<String>;
}

/// Term-mining collaborator boundary.
pub trait TermProvider {
    /// Extract technical terms with translations from document text.
    fn extract_terms(&self, text: &str) -> Result<TermExtractionResult>;
}

/// Configuration for the translation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run layout analysis (and figure/table masking) per page
    pub layout_enabled: bool,

    /// Mine terms from the document before translating
    pub term_extraction_enabled: bool,

    /// Annotation engine settings
    pub annotation: AnnotationConfig,

    /// Layout classifier settings
    pub layout: LayoutConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            layout_enabled: true,
            term_extraction_enabled: true,
            annotation: AnnotationConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a config with layout analysis and term extraction enabled.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A translated page: blocks carry translated, annotated text; untouched
/// blocks (inside figure or table regions) keep their source text.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedPage {
    /// 1-based page number
    pub number: u32,
    /// Blocks in the original extraction order
    pub blocks: Vec<TextBlock>,
    /// Layout regions detected for the page (empty when layout is disabled
    /// or analysis failed)
    pub regions: Vec<Region>,
}

/// Summary statistics for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    /// Number of pages processed
    pub pages_processed: usize,
    /// Number of distinct terms supplied to the annotator
    pub terms_extracted: usize,
    /// Total annotations inserted across the document
    pub annotations_added: usize,
}

/// Output of a full pipeline run, consumed by the rendering collaborator.
///
/// Renderers must escape uniformly and never re-process the inserted
/// annotation substrings.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedDocument {
    /// Translated pages in input order
    pub pages: Vec<TranslatedPage>,
    /// Run statistics
    pub summary: PipelineSummary,
}

/// Result of an analysis dry-run (no translation performed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentAnalysis {
    /// Total pages seen
    pub total_pages: usize,
    /// Pages with extracted text
    pub text_pages: usize,
    /// Pages without text (image-only)
    pub image_pages: usize,
    /// Total characters of extracted text
    pub total_chars: usize,
    /// Distinct mined terms, sorted
    pub terms: Vec<String>,
}

/// Check whether a block sits inside a figure or table region (by center
/// point) and is therefore excluded from translation.
pub fn is_masked_block(block: &TextBlock, regions: &[Region]) -> bool {
    let center = block.bbox.center();
    regions
        .iter()
        .any(|r| r.region_type.is_masked() && r.contains_point(center.x, center.y))
}

/// The document translation pipeline.
///
/// Owns its collaborators and the annotation engine. The run is
/// single-threaded; with [`AnnotationScope::Global`](crate::annotate::AnnotationScope)
/// the engine's session spans the whole document, giving document-wide
/// first-occurrence glossing.
pub struct TranslationPipeline {
    translator: Box<dyn Translator>,
    term_provider: Option<Box<dyn TermProvider>>,
    layout_analyzer: LayoutAnalyzer,
    annotator: Annotator,
    config: PipelineConfig,
}

impl TranslationPipeline {
    /// Create a pipeline from its collaborators and configuration.
    pub fn new(
        translator: Box<dyn Translator>,
        term_provider: Option<Box<dyn TermProvider>>,
        config: PipelineConfig,
    ) -> Self {
        let layout_analyzer = LayoutAnalyzer::with_config(config.layout.clone());
        let annotator = Annotator::with_config(config.annotation.clone());
        Self {
            translator,
            term_provider,
            layout_analyzer,
            annotator,
            config,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Translate a document page by page.
    pub fn translate_document(&mut self, pages: &[Page]) -> TranslatedDocument {
        let terms = self.mine_document_terms(pages);

        let mut out_pages = Vec::with_capacity(pages.len());
        let mut annotations_added = 0;

        for page in pages {
            log::info!("Processing page {}/{}", page.number, pages.len());
            if !page.has_text() {
                log::info!("Page {} has no text, skipping translation", page.number);
            }

            let layout = self.page_layout(page);

            let mut blocks = Vec::with_capacity(page.text_blocks.len());
            for block in &page.text_blocks {
                // Blocks inside figure or table regions pass through untouched.
                if is_masked_block(block, &layout.regions) {
                    blocks.push(block.clone());
                    continue;
                }

                let translated = match self.translator.translate(&block.text) {
                    Ok(text) => text,
                    Err(e) => {
                        log::error!("Translation failed on page {}: {}", page.number, e);
                        block.text.clone()
                    },
                };

                let result = self.annotator.process(&translated, &terms);
                let text = if result.success {
                    annotations_added += result.annotations_added;
                    result.processed_text
                } else {
                    log::warn!(
                        "Annotation pass failed on page {}: {}",
                        page.number,
                        result.error.as_deref().unwrap_or("unknown error")
                    );
                    translated
                };

                let mut translated_block = block.clone();
                translated_block.text = text;
                blocks.push(translated_block);
            }

            out_pages.push(TranslatedPage {
                number: page.number,
                blocks,
                regions: layout.regions,
            });
        }

        TranslatedDocument {
            summary: PipelineSummary {
                pages_processed: out_pages.len(),
                terms_extracted: terms.len(),
                annotations_added,
            },
            pages: out_pages,
        }
    }

    /// Analyze a document without translating (dry run).
    pub fn analyze(&self, pages: &[Page]) -> DocumentAnalysis {
        let mut text_pages = 0;
        let mut image_pages = 0;
        let mut total_chars = 0;
        let mut terms = BTreeSet::new();

        for page in pages {
            if page.has_text() {
                text_pages += 1;
                total_chars += page
                    .text_blocks
                    .iter()
                    .map(|b| b.text.chars().count())
                    .sum::<usize>();

                if self.config.term_extraction_enabled {
                    if let Some(provider) = &self.term_provider {
                        match provider.extract_terms(&page.text_content()) {
                            Ok(result) => {
                                terms.extend(result.terms.into_iter().map(|t| t.text));
                            },
                            Err(e) => {
                                log::error!(
                                    "Term extraction failed for page {}: {}",
                                    page.number,
                                    e
                                );
                            },
                        }
                    }
                }
            } else {
                image_pages += 1;
            }
        }

        DocumentAnalysis {
            total_pages: pages.len(),
            text_pages,
            image_pages,
            total_chars,
            terms: terms.into_iter().collect(),
        }
    }

    /// Mine terms across the whole document, degrading to an empty map on
    /// collaborator failure.
    fn mine_document_terms(&self, pages: &[Page]) -> TermMap {
        if !self.config.term_extraction_enabled {
            return TermMap::new();
        }
        let Some(provider) = &self.term_provider else {
            return TermMap::new();
        };

        let full_text = pages
            .iter()
            .filter(|p| p.has_text())
            .map(|p| p.text_content())
            .collect::<Vec<_>>()
            .join("\n");

        match provider.extract_terms(&full_text) {
            Ok(result) => {
                log::info!("Extracted {} technical terms", result.len());
                result.to_term_map()
            },
            Err(e) => {
                log::error!("Term extraction failed: {}", e);
                TermMap::new()
            },
        }
    }

    /// Run layout analysis for one page, falling back to the empty result.
    fn page_layout(&self, page: &Page) -> LayoutAnalysisResult {
        if !self.config.layout_enabled {
            return LayoutAnalysisResult::empty(page.number, page.width, page.height);
        }
        match self.layout_analyzer.analyze_page(page) {
            Ok(result) => result,
            Err(e) => {
                log::error!("Layout analysis failed for page {}: {}", page.number, e);
                LayoutAnalysisResult::empty(page.number, page.width, page.height)
            },
        }
    }
}
