//! Markup to plain-text normalization.
//!
//! Registry exports are loose HTML fragments in which `<br>` is the only
//! reliable line marker. The normalizer turns them into plain text with one
//! source line per text line and keeps the parsed tree for annex extraction.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use unicode_normalization::UnicodeNormalization;

/// Runs of horizontal whitespace (including non-breaking spaces).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HORIZONTAL_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid regex"));

/// Plain text plus the markup tree it came from.
pub struct NormalizedText {
    /// Normalized plain text.
    pub text: String,

    /// Parsed markup; `None` for empty input.
    pub tree: Option<Html>,
}

impl NormalizedText {
    /// Normalized text of empty input.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            tree: None,
        }
    }
}

/// Normalize raw markup into plain text.
///
/// Line-break tags become newlines, all other markup is stripped, entities
/// are decoded by the HTML parser, and whitespace is collapsed with
/// [`collapse_whitespace`]. Never fails: the HTML5 parser recovers from any
/// malformed input.
///
/// # Examples
/// ```
/// use normas_parser::normalize::normalize_markup;
///
/// let normalized = normalize_markup("<p>VISTO  el&nbsp;expediente<br/>CONSIDERANDO:</p>");
/// assert_eq!(normalized.text, "VISTO el expediente\nCONSIDERANDO:");
/// assert!(normalized.tree.is_some());
/// ```
#[must_use]
pub fn normalize_markup(raw: &str) -> NormalizedText {
    if raw.trim().is_empty() {
        return NormalizedText::empty();
    }

    let marked = raw.replace("<br", "\n<br").replace("<BR", "\n<BR");
    let tree = Html::parse_document(&marked);

    let text: String = tree.root_element().text().collect();
    let text = collapse_whitespace(&text);

    NormalizedText {
        text,
        tree: Some(tree),
    }
}

/// Compose to NFC, collapse spaces and tabs, drop carriage returns and trim.
///
/// Newlines are preserved. Applying it twice is the same as applying it once.
///
/// # Examples
/// ```
/// use normas_parser::normalize::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  a \t b\r\n\nc  "), "a b\n\nc");
/// ```
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let composed: String = text.nfc().filter(|c| *c != '\r').collect();
    HORIZONTAL_WS
        .replace_all(&composed, " ")
        .trim()
        .to_string()
}

/// Trim `text`, mapping an empty result to `None`.
pub(crate) fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
