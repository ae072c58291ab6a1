//! Rule-based page layout classification.
//!
//! Classifies each extracted text block into a region type using font size,
//! position, and text pattern heuristics. List markers take precedence over
//! font-size-based title detection, which in turn outranks the positional
//! header/footer bands; everything else is a paragraph.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::column_detector::detect_columns;
use crate::layout::region::{Region, RegionType};
use crate::page::{Page, TextBlock};

/// Bullet glyphs that mark a list item.
const LIST_BULLETS: [char; 5] = ['•', '●', '○', '-', '*'];

lazy_static! {
    /// Numbered list marker: one or more digits followed by '.' or ')'
    static ref NUMBERED_ITEM: Regex = Regex::new(r"^\d+[.)]").unwrap();
}

/// Configuration for the layout classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Run column detection per page
    pub column_detection_enabled: bool,

    /// A block is a title when its font size reaches this multiple of the
    /// page's mean font size (pages with two or more blocks)
    pub title_scale: f32,

    /// Maximum title length in characters
    pub title_max_chars: usize,

    /// Absolute font-size threshold for single-block pages, where no page
    /// mean is available
    pub single_block_title_size: f32,

    /// Fraction of the page height treated as the header band (top) and
    /// footer band (bottom)
    pub edge_band_ratio: f32,

    /// Confidence assigned to every rule-based classification
    pub rule_confidence: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_detection_enabled: true,
            title_scale: 1.25,
            title_max_chars: 100,
            single_block_title_size: 14.0,
            edge_band_ratio: 0.05,
            rule_confidence: 0.8,
        }
    }
}

impl LayoutConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable per-page column detection.
    pub fn with_column_detection(mut self, enabled: bool) -> Self {
        self.column_detection_enabled = enabled;
        self
    }
}

/// Result of layout analysis for a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutAnalysisResult {
    /// 1-based page number
    pub page_number: u32,
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Classified regions in reading order (top-to-bottom, left-to-right)
    pub regions: Vec<Region>,
    /// Detected column count (1 when detection is disabled or inconclusive)
    pub column_count: usize,
    /// Whether any region was classified as a table
    pub has_tables: bool,
    /// Whether any region was classified as a figure
    pub has_figures: bool,
}

impl LayoutAnalysisResult {
    /// The empty fallback result substituted when analysis of a page fails:
    /// no regions, a single column, no tables or figures.
    pub fn empty(page_number: u32, page_width: f32, page_height: f32) -> Self {
        Self {
            page_number,
            page_width,
            page_height,
            regions: Vec::new(),
            column_count: 1,
            has_tables: false,
            has_figures: false,
        }
    }
}

/// Rule-based layout analyzer.
///
/// Stateless across pages; one instance may be shared freely between
/// page-parallel workers.
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalyzer {
    config: LayoutConfig,
}

impl LayoutAnalyzer {
    /// Create an analyzer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Analyze the layout of a single page.
    ///
    /// Returns an error for malformed page geometry (non-finite or
    /// non-positive dimensions); callers processing whole documents decide
    /// whether to substitute [`LayoutAnalysisResult::empty`].
    pub fn analyze_page(&self, page: &Page) -> Result<LayoutAnalysisResult> {
        if !page.width.is_finite()
            || !page.height.is_finite()
            || page.width <= 0.0
            || page.height <= 0.0
        {
            return Err(Error::Layout(format!(
                "page {} has invalid dimensions {}x{}",
                page.number, page.width, page.height
            )));
        }

        let mut blocks: Vec<&TextBlock> = page.text_blocks.iter().collect();
        blocks.sort_by(|a, b| {
            a.bbox
                .top()
                .total_cmp(&b.bbox.top())
                .then(a.bbox.left().total_cmp(&b.bbox.left()))
        });

        // Mean font size is only meaningful with at least two blocks.
        let mean_font_size = if page.text_blocks.len() > 1 {
            let sum: f32 = page.text_blocks.iter().map(|b| b.font_size).sum();
            Some(sum / page.text_blocks.len() as f32)
        } else {
            None
        };

        let mut regions = Vec::with_capacity(blocks.len() + page.images.len());
        for block in &blocks {
            let region_type = self.classify_block(block, mean_font_size, page.height);
            regions.push(
                Region::new(region_type, block.bbox, self.config.rule_confidence)
                    .with_text(block.text.clone()),
            );
        }

        // Images become figure regions so figure-masking works without an
        // external detector.
        for image in &page.images {
            regions.push(Region::new(
                RegionType::Figure,
                image.bbox,
                self.config.rule_confidence,
            ));
        }

        let column_count = if self.config.column_detection_enabled {
            detect_columns(&page.text_blocks)
        } else {
            1
        };

        let has_tables = regions.iter().any(|r| r.region_type == RegionType::Table);
        let has_figures = regions.iter().any(|r| r.region_type == RegionType::Figure);

        Ok(LayoutAnalysisResult {
            page_number: page.number,
            page_width: page.width,
            page_height: page.height,
            regions,
            column_count,
            has_tables,
            has_figures,
        })
    }

    /// Analyze every page of a document.
    ///
    /// A page whose analysis fails degrades to the empty fallback result;
    /// the error is logged and never aborts the remaining pages.
    pub fn analyze_document(&self, pages: &[Page]) -> Vec<LayoutAnalysisResult> {
        pages
            .iter()
            .map(|page| match self.analyze_page(page) {
                Ok(result) => result,
                Err(e) => {
                    log::error!("Layout analysis failed for page {}: {}", page.number, e);
                    LayoutAnalysisResult::empty(page.number, page.width, page.height)
                },
            })
            .collect()
    }

    /// Classify a single text block.
    fn classify_block(
        &self,
        block: &TextBlock,
        mean_font_size: Option<f32>,
        page_height: f32,
    ) -> RegionType {
        let text = block.text.trim();

        // List markers first: they override font-size-based title detection.
        if is_list_item(text) {
            return RegionType::List;
        }

        let short_enough = text.chars().count() < self.config.title_max_chars;
        match mean_font_size {
            Some(mean) => {
                if block.font_size >= mean * self.config.title_scale && short_enough {
                    return RegionType::Title;
                }
            },
            None => {
                if block.font_size > self.config.single_block_title_size && short_enough {
                    return RegionType::Title;
                }
            },
        }

        if block.bbox.top() < page_height * self.config.edge_band_ratio {
            return RegionType::Header;
        }
        if block.bbox.bottom() > page_height * (1.0 - self.config.edge_band_ratio) {
            return RegionType::Footer;
        }

        RegionType::Paragraph
    }
}

/// Check whether text starts with a list marker (bullet glyph or numbering).
fn is_list_item(text: &str) -> bool {
    text.starts_with(&LIST_BULLETS[..]) || NUMBERED_ITEM.is_match(text)
}

/// Collect text of regions of the given type, grouped by page number.
///
/// Pages with no matching regions are absent from the map.
pub fn text_by_region_type(
    results: &[LayoutAnalysisResult],
    region_type: RegionType,
) -> HashMap<u32, Vec<String>> {
    let mut by_page = HashMap::new();

    for result in results {
        let texts: Vec<String> = result
            .regions
            .iter()
            .filter(|r| r.region_type == region_type)
            .filter_map(|r| r.text.clone())
            .collect();

        if !texts.is_empty() {
            by_page.insert(result.page_number, texts);
        }
    }

    by_page
}
