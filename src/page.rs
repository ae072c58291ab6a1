//! Page model supplied by the extraction collaborator.
//!
//! Text, font, and bounding-box extraction (and OCR for image-only pages)
//! happen outside this crate; extractors hand over [`Page`] values and the
//! layout classifier and translation pipeline consume them. Image payloads
//! stay with the extractor; only geometry crosses the boundary.

use crate::geometry::Rect;

/// A block of extracted text with its position and font metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// The extracted text content
    pub text: String,
    /// Bounding box of the block on the page
    pub bbox: Rect,
    /// Font size in points
    pub font_size: f32,
    /// Font name, when the extractor reports one
    pub font_name: Option<String>,
}

impl TextBlock {
    /// Create a new text block.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_gloss::geometry::Rect;
    /// use pdf_gloss::page::TextBlock;
    ///
    /// let block = TextBlock::new("Introduction", Rect::new(50.0, 100.0, 200.0, 20.0), 12.0);
    /// assert_eq!(block.text, "Introduction");
    /// assert_eq!(block.font_size, 12.0);
    /// ```
    pub fn new(text: impl Into<String>, bbox: Rect, font_size: f32) -> Self {
        Self {
            text: text.into(),
            bbox,
            font_size,
            font_name: None,
        }
    }

    /// Attach the font name reported by the extractor.
    pub fn with_font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }
}

/// Geometry-only handle to an image placed on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRef {
    /// Bounding box of the image on the page
    pub bbox: Rect,
}

impl ImageRef {
    /// Create a new image reference.
    pub fn new(bbox: Rect) -> Self {
        Self { bbox }
    }
}

/// A single page of an extracted document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Extracted text blocks in extraction order
    pub text_blocks: Vec<TextBlock>,
    /// Images placed on the page
    pub images: Vec<ImageRef>,
}

impl Page {
    /// Create an empty page with the given number and dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            text_blocks: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Check whether the page contains any text.
    pub fn has_text(&self) -> bool {
        !self.text_blocks.is_empty()
    }

    /// Check whether the page contains any images.
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    /// Get all text content joined by newlines, in block order.
    pub fn text_content(&self) -> String {
        self.text_blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Add a text block to the page.
    pub fn add_text_block(&mut self, block: TextBlock) {
        self.text_blocks.push(block);
    }

    /// Add an image reference to the page.
    pub fn add_image(&mut self, image: ImageRef) {
        self.images.push(image);
    }
}
