//! Column count detection from text block positions.
//!
//! Columns are inferred from left-edge x-coordinates: positions shared by
//! at least two blocks are candidate column starts, and a large enough gap
//! between consecutive candidates counts as a column separator.

use crate::page::TextBlock;

/// Minimum gap (in page units) between candidate column starts for the gap
/// to count as a column separator, regardless of the page's average gap.
const MIN_COLUMN_GAP: f32 = 150.0;

/// Detect the number of columns from the page's text blocks.
///
/// Pages with no blocks, or with all blocks sharing one left edge, report a
/// single column.
///
/// # Examples
///
/// ```
/// use pdf_gloss::geometry::Rect;
/// use pdf_gloss::layout::detect_columns;
/// use pdf_gloss::page::TextBlock;
///
/// let blocks = vec![
///     TextBlock::new("left a", Rect::new(50.0, 100.0, 150.0, 20.0), 12.0),
///     TextBlock::new("left b", Rect::new(50.0, 130.0, 150.0, 20.0), 12.0),
///     TextBlock::new("right a", Rect::new(350.0, 100.0, 150.0, 20.0), 12.0),
///     TextBlock::new("right b", Rect::new(350.0, 130.0, 150.0, 20.0), 12.0),
/// ];
/// assert_eq!(detect_columns(&blocks), 2);
/// ```
pub fn detect_columns(blocks: &[TextBlock]) -> usize {
    if blocks.is_empty() {
        return 1;
    }

    let x_positions: Vec<f32> = blocks.iter().map(|b| b.bbox.left()).collect();

    let mut unique_x = x_positions.clone();
    unique_x.sort_by(f32::total_cmp);
    unique_x.dedup();

    if unique_x.len() <= 1 {
        return 1;
    }

    // Gaps over ALL unique positions set the adaptive threshold baseline.
    let gaps: Vec<f32> = unique_x.windows(2).map(|w| w[1] - w[0]).collect();
    if gaps.is_empty() {
        return 1;
    }

    // Only positions shared by multiple blocks are credible column starts;
    // a lone indented block must not spawn a column.
    let shared_x: Vec<f32> = unique_x
        .iter()
        .copied()
        .filter(|&x| x_positions.iter().filter(|&&p| p == x).count() >= 2)
        .collect();

    if shared_x.len() <= 1 {
        return 1;
    }

    let column_gaps: Vec<f32> = shared_x.windows(2).map(|w| w[1] - w[0]).collect();

    let avg_gap = gaps.iter().sum::<f32>() / gaps.len() as f32;
    let threshold = (avg_gap * 0.8).max(MIN_COLUMN_GAP);

    let separators = column_gaps.iter().filter(|&&gap| gap >= threshold).count();
    separators + 1
}
