//! Layout region types.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Semantic classification of a page region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    /// Page or section title (large font, short text)
    Title,
    /// Regular body text
    Paragraph,
    /// Bulleted or numbered list item
    List,
    /// Tabular content
    Table,
    /// Figure or image area
    Figure,
    /// Running header at the top of the page
    Header,
    /// Running footer at the bottom of the page
    Footer,
    /// Unclassified content
    Unknown,
}

impl RegionType {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionType::Title => "title",
            RegionType::Paragraph => "paragraph",
            RegionType::List => "list",
            RegionType::Table => "table",
            RegionType::Figure => "figure",
            RegionType::Header => "header",
            RegionType::Footer => "footer",
            RegionType::Unknown => "unknown",
        }
    }

    /// Check whether text blocks inside this region are excluded from
    /// translation (figures and tables).
    pub fn is_masked(&self) -> bool {
        matches!(self, RegionType::Figure | RegionType::Table)
    }
}

/// A classified rectangular area of a page.
///
/// Regions are created fresh per page during layout analysis and are
/// immutable once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Semantic type of the region
    pub region_type: RegionType,
    /// Bounding box on the page
    pub bbox: Rect,
    /// Classification confidence in [0, 1]
    pub confidence: f32,
    /// Text content of the region, when it was built from a text block
    pub text: Option<String>,
}

impl Region {
    /// Create a new region.
    pub fn new(region_type: RegionType, bbox: Rect, confidence: f32) -> Self {
        Self {
            region_type,
            bbox,
            confidence,
            text: None,
        }
    }

    /// Attach the text this region was classified from.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Check whether a point lies within the region.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.bbox.contains_point(x, y)
    }

    /// Check whether this region overlaps another.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.bbox.overlaps(&other.bbox)
    }
}
