//! Spacing and formatting normalization for translated text.
//!
//! Runs as the final pass of the annotation engine, after term annotations
//! have been spliced in, so annotation punctuation (full-width parentheses)
//! never participates in spacing decisions; only letter/ideograph adjacency
//! does. Both passes are pure functions and can be used standalone.

use lazy_static::lazy_static;
use regex::Regex;

/// Character ranges treated as CJK for spacing purposes:
/// Hiragana, Katakana, CJK Unified Ideographs + Extension A, and Hangul.
const CJK: &str = "\u{3040}-\u{309F}\u{30A0}-\u{30FF}\u{3400}-\u{4DBF}\u{4E00}-\u{9FFF}\u{AC00}-\u{D7AF}";

lazy_static! {
    /// CJK character immediately followed by a Latin alphanumeric
    static ref CJK_BEFORE_LATIN: Regex =
        Regex::new(&format!("([{CJK}])([A-Za-z0-9])")).unwrap();

    /// Latin alphanumeric immediately followed by a CJK character
    static ref LATIN_BEFORE_CJK: Regex =
        Regex::new(&format!("([A-Za-z0-9])([{CJK}])")).unwrap();

    /// Runs of two or more plain spaces (tabs and newlines excluded)
    static ref MULTI_SPACE: Regex = Regex::new(" {2,}").unwrap();

    /// Three or more consecutive newlines
    static ref EXCESS_NEWLINES: Regex = Regex::new("\n{3,}").unwrap();
}

/// Insert a single space at every boundary where a CJK character is directly
/// adjacent to a Latin alphanumeric (in either direction), then collapse runs
/// of plain spaces down to one. Tabs and newlines are never touched.
///
/// # Examples
///
/// ```
/// use pdf_gloss::normalize::adjust_spacing;
///
/// assert_eq!(adjust_spacing("これはAPIの説明です"), "これは API の説明です");
/// assert_eq!(adjust_spacing("JSONファイル"), "JSON ファイル");
/// assert_eq!(adjust_spacing("a  b"), "a b");
/// ```
pub fn adjust_spacing(text: &str) -> String {
    let text = CJK_BEFORE_LATIN.replace_all(text, "$1 $2");
    let text = LATIN_BEFORE_CJK.replace_all(&text, "$1 $2");
    MULTI_SPACE.replace_all(&text, " ").into_owned()
}

/// Normalize line-ending variants (`\r\n`, `\r`) to `\n` and cap vertical
/// whitespace by collapsing three or more consecutive newlines to exactly
/// two. Single paragraph breaks are preserved.
///
/// # Examples
///
/// ```
/// use pdf_gloss::normalize::normalize_line_breaks;
///
/// assert_eq!(normalize_line_breaks("a\r\nb\rc"), "a\nb\nc");
/// assert_eq!(normalize_line_breaks("a\n\n\n\nb"), "a\n\nb");
/// assert_eq!(normalize_line_breaks("a\n\nb"), "a\n\nb");
/// ```
pub fn normalize_line_breaks(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    EXCESS_NEWLINES.replace_all(&text, "\n\n").into_owned()
}
