//! Annex links from the markup tree.

use scraper::{Html, Selector};

use crate::types::Annex;

/// Collect every link to a PDF document, labelled `{label} 1`, `{label} 2`, ...
///
/// Links are returned in document order. Without a markup tree there are
/// no annexes.
#[must_use]
pub fn extract_annexes(tree: Option<&Html>, label: &str) -> Vec<Annex> {
    let Some(tree) = tree else {
        return Vec::new();
    };
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    tree.select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.to_ascii_lowercase().contains(".pdf"))
        .enumerate()
        .map(|(i, href)| Annex {
            nombre: format!("{label} {}", i + 1),
            url: href.to_string(),
        })
        .collect()
}
