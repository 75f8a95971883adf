//! Body extraction strategies.
//!
//! The number of nesting levels is never declared in the source text, so
//! each strategy looks for the levels it expects and falls back to a
//! flatter tree when a level is missing.

use super::articles::{extract_articles, truncate_trailing_matter};
use super::headers::{find_headers, partition};
use crate::patterns::PatternSet;
use crate::types::{Chapter, Title};

/// Trait for document-type specific body extraction.
pub trait BodyStrategy {
    /// Build the body tree for the given body text.
    fn extract(&self, body: &str, patterns: &PatternSet) -> Vec<Title>;
}

/// Two-level strategy for laws: chapters, then articles.
///
/// The result is always a single title-less wrapper.
pub struct LawStrategy;

impl BodyStrategy for LawStrategy {
    fn extract(&self, body: &str, patterns: &PatternSet) -> Vec<Title> {
        let mut title = chapters_or_articles(body, patterns);

        // The last article absorbs the closing signature block in laws;
        // trailing chapters without articles are skipped
        let last = match title.capitulos.iter_mut().rev().find(|c| !c.articulos.is_empty()) {
            Some(chapter) => chapter.articulos.last_mut(),
            None => title.articulos.last_mut(),
        };
        if let Some(last) = last {
            truncate_trailing_matter(last, patterns);
        }

        vec![title]
    }
}

/// Three-level strategy for decrees: titles, chapters, then articles.
pub struct DecreeStrategy;

impl BodyStrategy for DecreeStrategy {
    fn extract(&self, body: &str, patterns: &PatternSet) -> Vec<Title> {
        let headers = find_headers(body, &patterns.title_header);
        if headers.is_empty() {
            return vec![Title::untitled(extract_articles(body, patterns))];
        }

        let (lead, sections) = partition(body, headers);
        let mut titles = Vec::with_capacity(sections.len() + 1);

        let lead_articles = extract_articles(lead, patterns);
        if !lead_articles.is_empty() {
            titles.push(Title::untitled(lead_articles));
        }

        for section in sections {
            let inner = chapters_or_articles(section.text, patterns);
            titles.push(Title {
                titulo: Some(section.header.ordinal),
                nombre: section.header.name,
                capitulos: inner.capitulos,
                articulos: inner.articulos,
            });
        }

        tracing::debug!(titles = titles.len(), "extracted decree titles");
        titles
    }
}

/// Split `text` into chapters when it has chapter headers, otherwise into a
/// flat article list. Articles before the first chapter stay at title level.
fn chapters_or_articles(text: &str, patterns: &PatternSet) -> Title {
    let headers = find_headers(text, &patterns.chapter_header);
    if headers.is_empty() {
        return Title::untitled(extract_articles(text, patterns));
    }

    let (lead, sections) = partition(text, headers);
    let capitulos = sections
        .into_iter()
        .map(|section| Chapter {
            capitulo: Some(section.header.ordinal),
            titulo: section.header.name,
            articulos: extract_articles(section.text, patterns),
        })
        .collect();

    Title {
        titulo: None,
        nombre: None,
        capitulos,
        articulos: extract_articles(lead, patterns),
    }
}
