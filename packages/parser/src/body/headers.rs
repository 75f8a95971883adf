//! Section header detection and partitioning.

use regex::Regex;

/// A chapter or title header found in the body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Byte offset where the header line starts.
    pub start: usize,

    /// Byte offset just after the header line (before its newline).
    pub end: usize,

    /// Ordinal as written ("I", "12", "ÚNICO").
    pub ordinal: String,

    /// Name on the header line, if any.
    pub name: Option<String>,
}

/// A header together with the text it governs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub header: Header,
    pub text: &'a str,
}

/// Find every header matched by `pattern` in `text`.
///
/// `pattern` must capture the ordinal as group 1 and the rest of the line
/// as group 2.
#[must_use]
pub fn find_headers(text: &str, pattern: &Regex) -> Vec<Header> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let ordinal = caps.get(1)?.as_str().to_string();
            let name = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
                .map(String::from);
            Some(Header {
                start: whole.start(),
                end: whole.end(),
                ordinal,
                name,
            })
        })
        .collect()
}

/// Split `text` at header boundaries.
///
/// Returns the text before the first header and one section per header,
/// each running from the end of its header line to the start of the next
/// header (or the end of `text`).
#[must_use]
pub fn partition(text: &str, headers: Vec<Header>) -> (&str, Vec<Section<'_>>) {
    let lead_end = headers.first().map_or(text.len(), |h| h.start);
    let lead = &text[..lead_end];

    let bounds: Vec<usize> = headers
        .iter()
        .skip(1)
        .map(|h| h.start)
        .chain(std::iter::once(text.len()))
        .collect();

    let sections = headers
        .into_iter()
        .zip(bounds)
        .map(|(header, next)| {
            let text = &text[header.end..next];
            Section { header, text }
        })
        .collect();

    (lead, sections)
}
