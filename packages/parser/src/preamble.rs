//! Decree preamble clauses: context, VISTO and CONSIDERANDO.

use crate::normalize::non_empty;
use crate::patterns::PatternSet;
use crate::types::Preamble;

/// Extract the preamble clauses from the preamble block of a decree.
///
/// A clause that is missing, or empty once trimmed, is `None`.
#[must_use]
pub fn analyze_preamble(preamble: &str, patterns: &PatternSet) -> Preamble {
    let contexto = patterns
        .context
        .find(preamble)
        .and_then(|m| non_empty(m.as_str()));

    let visto = patterns
        .visto
        .captures(preamble)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str()));

    let considerando = patterns
        .considerando
        .captures(preamble)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str()));

    Preamble {
        contexto,
        visto,
        considerando,
    }
}
