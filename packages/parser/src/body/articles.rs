//! Article extraction, shared by every body strategy.

use crate::patterns::PatternSet;
use crate::types::Article;

/// Leading punctuation left over from header separators ("1°.- Texto").
const LEADING_STRAY: &[char] = &['–', '-', '•', ' '];

/// An accepted article header.
struct ArticleHead {
    start: usize,
    end: usize,
    ordinal: u32,
}

/// Extract the articles contained in one body segment.
///
/// Headers immediately preceded by a quotation mark are references quoted
/// inside another article and are skipped. A header whose ordinal does not
/// exceed the previous one is kept as text of the previous article, so
/// ordinals within a segment are unique and increasing.
#[must_use]
pub fn extract_articles(segment: &str, patterns: &PatternSet) -> Vec<Article> {
    let mut heads: Vec<ArticleHead> = Vec::new();

    for caps in patterns.article_header.captures_iter(segment) {
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if PatternSet::is_quoted_at(segment, whole.start()) {
            tracing::trace!(offset = whole.start(), "skipping quoted article header");
            continue;
        }

        let Ok(ordinal) = number.as_str().parse::<u32>() else {
            tracing::debug!(number = number.as_str(), "article ordinal out of range");
            continue;
        };

        if let Some(previous) = heads.last() {
            if ordinal <= previous.ordinal {
                tracing::debug!(
                    ordinal,
                    previous = previous.ordinal,
                    "out-of-order article header kept as text"
                );
                continue;
            }
        }

        heads.push(ArticleHead {
            start: whole.start(),
            end: whole.end(),
            ordinal,
        });
    }

    let bounds: Vec<usize> = heads
        .iter()
        .skip(1)
        .map(|h| h.start)
        .chain(std::iter::once(segment.len()))
        .collect();

    heads
        .iter()
        .zip(bounds)
        .map(|(head, next)| {
            let texto = segment[head.end..next]
                .trim_start_matches(LEADING_STRAY)
                .trim();
            Article::new(head.ordinal, texto)
        })
        .collect()
}

/// Cut signatures or a trailing note that ended up inside an article.
///
/// Laws have no separate tail region, so the closing signature block and
/// any `NOTA:` are appended to the last article of the text.
pub fn truncate_trailing_matter(article: &mut Article, patterns: &PatternSet) {
    let mut cut = article.texto.len();

    if let Some(offset) = patterns.find_signature_line(&article.texto) {
        cut = cut.min(offset);
    }
    if let Some(m) = patterns.note_start.find(&article.texto) {
        cut = cut.min(m.start());
    }

    if cut < article.texto.len() {
        article.texto = article.texto[..cut].trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use pretty_assertions::assert_eq;

    fn patterns() -> PatternSet {
        PatternSet::new(&ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_articles_basic() {
        let text = "ARTÍCULO 1°.- Apruébase el reglamento.\nARTÍCULO 2°.- Comuníquese.";
        let articles = extract_articles(text, &patterns());

        assert_eq!(
            articles,
            vec![
                Article::new(1, "Apruébase el reglamento."),
                Article::new(2, "Comuníquese."),
            ]
        );
    }

    #[test]
    fn test_extract_articles_separators() {
        let text = "Artículo 1º - Uno.\nARTICULO 2.– Dos.\nartículo 3° • Tres.\nARTÍCULO 4 . Cuatro.";
        let articles = extract_articles(text, &patterns());
        let ordinals: Vec<u32> = articles.iter().map(|a| a.art).collect();

        assert_eq!(ordinals, vec![1, 2, 4]);
        assert_eq!(articles[0].texto, "Uno.");
        assert_eq!(articles[1].texto, "Dos.\nartículo 3° • Tres.");
        assert_eq!(articles[2].texto, "Cuatro.");
    }

    #[test]
    fn test_extract_articles_skips_quoted_headers() {
        let text = "ARTÍCULO 1°.- Sustitúyese el texto por el siguiente: “ARTÍCULO 7°.- Nuevo texto.”\nARTÍCULO 2°.- De forma.";
        let articles = extract_articles(text, &patterns());

        assert_eq!(articles.len(), 2);
        assert!(articles[0].texto.contains("“ARTÍCULO 7°.- Nuevo texto.”"));
        assert_eq!(articles[1].art, 2);
    }

    #[test]
    fn test_extract_articles_ignores_references_without_separator() {
        let text = "ARTÍCULO 1°.- Conforme el artículo 5 de la presente ley.\nARTÍCULO 2°.- Fin.";
        let articles = extract_articles(text, &patterns());
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].texto, "Conforme el artículo 5 de la presente ley.");
    }

    #[test]
    fn test_extract_articles_keeps_order() {
        let text = "ARTÍCULO 1°.- Uno.\nARTÍCULO 3°.- Tres, según artículo 2.- anterior.\nARTÍCULO 4°.- Cuatro.";
        let articles = extract_articles(text, &patterns());
        let ordinals: Vec<u32> = articles.iter().map(|a| a.art).collect();

        assert_eq!(ordinals, vec![1, 3, 4]);
        assert!(articles[1].texto.contains("según artículo 2.- anterior."));
    }

    #[test]
    fn test_extract_articles_gaps_allowed() {
        let text = "ARTÍCULO 1°.- a\nARTÍCULO 5°.- b";
        let ordinals: Vec<u32> = extract_articles(text, &patterns())
            .iter()
            .map(|a| a.art)
            .collect();
        assert_eq!(ordinals, vec![1, 5]);
    }

    #[test]
    fn test_extract_articles_none() {
        assert!(extract_articles("Texto sin artículos.", &patterns()).is_empty());
        assert!(extract_articles("", &patterns()).is_empty());
    }

    #[test]
    fn test_truncate_signature() {
        let mut article = Article::new(
            20,
            "Comuníquese al Poder Ejecutivo nacional.\nSERGIO MASSA - FEDERICO PINEDO - Juan P. Tunessi",
        );
        truncate_trailing_matter(&mut article, &patterns());
        assert_eq!(article.texto, "Comuníquese al Poder Ejecutivo nacional.");
    }

    #[test]
    fn test_truncate_note() {
        let mut article = Article::new(3, "De forma.\nNOTA: El Anexo no se publica.");
        truncate_trailing_matter(&mut article, &patterns());
        assert_eq!(article.texto, "De forma.");
    }

    #[test]
    fn test_truncate_leaves_clean_article() {
        let mut article = Article::new(3, "Comuníquese al Poder Ejecutivo.");
        truncate_trailing_matter(&mut article, &patterns());
        assert_eq!(article.texto, "Comuníquese al Poder Ejecutivo.");
    }
}
