//! Compiled matchers for every segmentation stage.
//!
//! A `PatternSet` is built once from a [`ParserConfig`] and owned by the
//! [`DocumentParser`](crate::parser::DocumentParser). Each heuristic that
//! decides where a segment starts or ends is exposed as a named method so it
//! can be tested and tuned on its own.

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::ParserConfig;
use crate::error::{ParserError, Result};

/// Article header: keyword, ordinal, optional ordinal suffix, separator.
const ARTICLE_HEADER: &str = r"(?i)\bART[ÍI]CULO\s+([0-9]+)[º°]?\s*[.\-–]\s*";

/// Any article keyword, with or without ordinal.
const ARTICLE_MARKER: &str = r"(?i)\bART[ÍI]CULO\b";

/// Chapter header at the start of a line.
const CHAPTER_HEADER: &str = r"(?im)^[ \t]*CAP[ÍI]TULO[ \t]+([IVXLCDM]+|[0-9]+|[ÚU]NICO)\b[º°]?[ \t]*[–\-.:]?[ \t]*(.*)$";

/// Title header at the start of a line.
const TITLE_HEADER: &str = r"(?im)^[ \t]*T[ÍI]TULO[ \t]+([IVXLCDM]+|[0-9]+|[ÚU]NICO|PRELIMINAR)\b[º°]?[ \t]*[–\-.:]?[ \t]*(.*)$";

/// Signature line: name segments joined by dashes, and nothing else.
///
/// The first segment is one capitalized word or a run of upper-case words
/// ("MILEI", "SERGIO MASSA"). Later segments may mix case and carry a
/// lower-case particle ("Julio M. de Vido"). A line with any other text after
/// the names, such as sentence punctuation, does not match.
const SIGNATURE_LINE: &str = concat!(
    r"^[ \t]*(\p{Lu}[\w.'’\-]{2,})",
    r"(?:[ \t]+\p{Lu}[\p{Lu}\d.'’\-]*)*",
    r"(?:[ \t]*-[ \t]*\p{Lu}[\w.'’\-]+",
    r"(?:[ \t]+(?:(?:de|del|la|las|los|y)[ \t]+)?\p{Lu}[\w.'’\-]*)*)+",
    r"[ \t]*$",
);

/// Closing footnote: edition date, instrument number, validity date.
const FOOTNOTE: &str = concat!(
    r"(?i)\be\.\s*([0-9]{2}/[0-9]{2}/[0-9]{4})\s*",
    r"N[º°]?\s*([0-9]+/[0-9]{2})\s*",
    r"v\.\s*([0-9]{2}/[0-9]{2}/[0-9]{4})",
);

/// Trailing note, up to a footnote line or the end of the text.
const NOTE: &str = r"(?is)\bNOTA:\s*(.*?)(?:\n\s*e\.\s*[0-9]{2}/[0-9]{2}/[0-9]{4}|\z)";

/// Start of a trailing note inside article text.
const NOTE_START: &str = r"(?i)\bNOTA:\s";

/// VISTO clause, up to the CONSIDERANDO line.
const VISTO: &str = r"(?is)\bVISTO\s+(.*?)\n\s*CONSIDERANDO";

/// CONSIDERANDO clause, to the end of the preamble.
const CONSIDERANDO: &str = r"(?is)\bCONSIDERANDO[ :]?(.*)";

/// Characters that mark an article keyword as quoted text.
const QUOTE_CHARS: [char; 4] = ['"', '“', '”', '\''];

/// All matchers used by the parser.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub body_anchor: Regex,
    pub context: Regex,
    pub closing_formula: Regex,
    pub article_header: Regex,
    pub article_marker: Regex,
    pub chapter_header: Regex,
    pub title_header: Regex,
    pub signature_line: Regex,
    pub footnote: Regex,
    pub note: Regex,
    pub note_start: Regex,
    pub visto: Regex,
    pub considerando: Regex,
    heading_denylist: Vec<String>,
}

impl PatternSet {
    /// Compile every matcher for the given profile.
    pub fn new(config: &ParserConfig) -> Result<Self> {
        config.validate()?;

        let closing = config
            .closing_keywords
            .iter()
            .map(|k| regex::escape(k.trim()))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            body_anchor: compile("body_anchor", &config.body_anchor)?,
            context: compile("context_pattern", &config.context_pattern)?,
            closing_formula: compile("closing_keywords", &format!(r"(?i)\b(?:{closing})\b"))?,
            article_header: compile("article_header", ARTICLE_HEADER)?,
            article_marker: compile("article_marker", ARTICLE_MARKER)?,
            chapter_header: compile("chapter_header", CHAPTER_HEADER)?,
            title_header: compile("title_header", TITLE_HEADER)?,
            signature_line: compile("signature_line", SIGNATURE_LINE)?,
            footnote: compile("footnote", FOOTNOTE)?,
            note: compile("note", NOTE)?,
            note_start: compile("note_start", NOTE_START)?,
            visto: compile("visto", VISTO)?,
            considerando: compile("considerando", CONSIDERANDO)?,
            heading_denylist: config
                .heading_denylist
                .iter()
                .map(|k| fold_keyword(k))
                .collect(),
        })
    }

    /// Check whether a line ends the operative text with a closing formula.
    ///
    /// Lines that also carry an article marker are still operative text
    /// ("ARTÍCULO 5°.- Comuníquese, publíquese ...").
    #[must_use]
    pub fn is_closing_formula_line(&self, line: &str) -> bool {
        self.closing_formula.is_match(line) && !self.article_marker.is_match(line)
    }

    /// Check whether a single line has the shape of a signature line.
    ///
    /// A footnote printed on the same line is ignored.
    #[must_use]
    pub fn is_signature_line(&self, line: &str) -> bool {
        let names = self.footnote.replace_all(line, "");
        let Some(caps) = self.signature_line.captures(names.trim_end()) else {
            return false;
        };
        let first = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        if self.is_heading_word(first) {
            tracing::debug!(line = line.trim(), "heading keyword rejected as signature line");
            return false;
        }
        if !line.chars().any(char::is_lowercase) {
            tracing::debug!(
                line = line.trim(),
                "all upper-case signature line; may be an unlisted heading"
            );
        }
        true
    }

    /// Byte offset of the first signature line in `text`.
    #[must_use]
    pub fn find_signature_line(&self, text: &str) -> Option<usize> {
        line_offsets(text).find_map(|(offset, line)| self.is_signature_line(line).then_some(offset))
    }

    /// Check whether `word` is a denylisted heading keyword.
    #[must_use]
    pub fn is_heading_word(&self, word: &str) -> bool {
        let word = word.trim_end_matches(|c: char| !c.is_alphanumeric());
        let folded = fold_keyword(word);
        self.heading_denylist.iter().any(|k| *k == folded)
    }

    /// Check whether the article header at `start` is quoted text.
    #[must_use]
    pub fn is_quoted_at(text: &str, start: usize) -> bool {
        text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| QUOTE_CHARS.contains(&c))
    }
}

/// Iterate over `(byte offset, line)` pairs; lines keep no terminator.
pub fn line_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line.trim_end_matches('\n')))
    })
}

/// Upper-case and strip accents, so "Capítulo" and "CAPITULO" compare equal.
fn fold_keyword(word: &str) -> String {
    word.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ParserError::InvalidPattern {
        name: name.to_string(),
        source,
    })
}
