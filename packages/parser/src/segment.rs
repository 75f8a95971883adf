//! Block segmentation of decree text into preamble, body and tail.
//!
//! The body-start anchor is reliable; the tail signal is a heuristic. The
//! tail is therefore only searched after the anchor, and the line tests
//! prefer keeping a line in the body over cutting legal text short.

use crate::patterns::{line_offsets, PatternSet};

/// The three macro-regions of a decree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBlocks {
    /// Text up to and including the body-start anchor.
    pub preamble: String,

    /// Operative text.
    pub body: String,

    /// Closing formula, signatures, note and footnote.
    pub tail: String,
}

impl DocumentBlocks {
    /// Check whether a tail region was found.
    #[must_use]
    pub fn has_tail(&self) -> bool {
        !self.tail.is_empty()
    }
}

/// Byte offset just past the body-start anchor, if present.
#[must_use]
pub fn find_body_anchor(text: &str, patterns: &PatternSet) -> Option<usize> {
    patterns.body_anchor.find(text).map(|m| m.end())
}

/// Byte offset of the first line that starts the tail.
///
/// A line starts the tail when it is a closing formula without an article
/// marker, or when it has the shape of a signature line.
#[must_use]
pub fn scan_for_tail(text: &str, patterns: &PatternSet) -> Option<usize> {
    line_offsets(text).find_map(|(offset, line)| {
        let flips = patterns.is_closing_formula_line(line) || patterns.is_signature_line(line);
        flips.then_some(offset)
    })
}

/// Split decree text into its three blocks.
///
/// Without a body-start anchor the whole text is the preamble.
#[must_use]
pub fn segment_decree(text: &str, patterns: &PatternSet) -> DocumentBlocks {
    let Some(anchor_end) = find_body_anchor(text, patterns) else {
        tracing::debug!("no body-start anchor; treating whole text as preamble");
        return DocumentBlocks {
            preamble: text.to_string(),
            ..DocumentBlocks::default()
        };
    };

    let preamble = text[..anchor_end].trim_end().to_string();
    let rest = &text[anchor_end..];

    let (body, tail) = match scan_for_tail(rest, patterns) {
        Some(flip) => (&rest[..flip], &rest[flip..]),
        None => (rest, ""),
    };

    DocumentBlocks {
        preamble,
        body: body.trim().to_string(),
        tail: tail.trim().to_string(),
    }
}
