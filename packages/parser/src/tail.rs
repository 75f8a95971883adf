//! Tail analysis: signatures, trailing note and closing footnote.

use crate::normalize::non_empty;
use crate::patterns::{line_offsets, PatternSet};
use crate::types::Footnote;

/// Separator between signer names on a signature line.
const NAME_SEPARATOR: &str = " - ";

/// Stray dash characters trimmed from each name.
const NAME_STRAY: &[char] = &[' ', '–', '—'];

/// Extract the ordered list of signer names.
///
/// The signature block starts at the first signature line and runs until a
/// blank line, a `NOTA:` line or a line opening with the footnote. The
/// block is flattened to one line before splitting, since long lists of
/// signers wrap across lines.
#[must_use]
pub fn extract_signatures(tail: &str, patterns: &PatternSet) -> Vec<String> {
    let Some(start) = patterns.find_signature_line(tail) else {
        return Vec::new();
    };

    let block: Vec<&str> = line_offsets(&tail[start..])
        .map(|(_, line)| line.trim())
        .enumerate()
        .take_while(|(i, line)| *i == 0 || !ends_signature_block(line, patterns))
        .map(|(_, line)| line)
        .collect();
    let joined = block.join(" ");
    let joined = patterns.footnote.replace_all(&joined, "");

    joined
        .split(NAME_SEPARATOR)
        .map(|name| name.trim_matches(NAME_STRAY).trim())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn ends_signature_block(line: &str, patterns: &PatternSet) -> bool {
    line.is_empty()
        || patterns.note_start.find(line).is_some_and(|m| m.start() == 0)
        || patterns.footnote.find(line).is_some_and(|m| m.start() == 0)
}

/// Extract the trailing `NOTA:` text, up to the footnote or the end.
#[must_use]
pub fn extract_note(text: &str, patterns: &PatternSet) -> Option<String> {
    patterns
        .note
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str()))
}

/// Extract the closing footnote and the residual text that follows it.
///
/// Without a footnote both values are `None`.
#[must_use]
pub fn extract_footnote(text: &str, patterns: &PatternSet) -> (Option<Footnote>, Option<String>) {
    let Some(caps) = patterns.footnote.captures(text) else {
        return (None, None);
    };
    let (Some(whole), Some(edicion), Some(numero), Some(validez)) =
        (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
    else {
        return (None, None);
    };

    let footnote = Footnote {
        edicion: edicion.as_str().to_string(),
        numero: numero.as_str().to_string(),
        validez: validez.as_str().to_string(),
    };
    (Some(footnote), non_empty(&text[whole.end()..]))
}
