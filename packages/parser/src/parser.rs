//! Document parser that ties all extraction stages together.

use crate::annex::extract_annexes;
use crate::body::{BodyStrategy, DecreeStrategy, LawStrategy};
use crate::config::ParserConfig;
use crate::error::Result;
use crate::meta::project_metadata;
use crate::normalize::normalize_markup;
use crate::patterns::PatternSet;
use crate::preamble::analyze_preamble;
use crate::segment::segment_decree;
use crate::tail::{extract_footnote, extract_note, extract_signatures};
use crate::types::{DocumentType, Metadata, ParsedDocument, Preamble, RawDocumentRecord};

/// Structure parser for law and decree records.
///
/// Holds the profile and the patterns compiled from it. Parsing never
/// mutates the parser, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    config: ParserConfig,
    patterns: PatternSet,
}

impl DocumentParser {
    /// Create a parser for the given profile.
    ///
    /// Fails when a configured pattern does not compile or the profile is
    /// invalid.
    pub fn new(config: ParserConfig) -> Result<Self> {
        let patterns = PatternSet::new(&config)?;
        Ok(Self { config, patterns })
    }

    /// Parser profile in use.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Compiled patterns in use.
    #[must_use]
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Parse one record into its normalized structure.
    ///
    /// Never fails on document content: unrecognized structure degrades to
    /// empty or partial fields, and an unknown document type yields a
    /// metadata-only skeleton.
    #[must_use]
    pub fn parse(&self, record: &RawDocumentRecord) -> ParsedDocument {
        let meta = project_metadata(record, &self.config.meta_fields);
        let doc_type = record.document_type();

        let doc = match &doc_type {
            DocumentType::Decree => self.parse_decree(record, meta),
            DocumentType::Law => self.parse_law(record, meta),
            DocumentType::Unknown(tag) => {
                tracing::debug!(id = ?record.id(), tag = %tag, "unsupported document type");
                ParsedDocument::skeleton(meta)
            }
        };

        tracing::debug!(
            id = ?record.id(),
            doc_type = doc_type.as_str(),
            articles = doc.article_count(),
            signatures = doc.firmas.len(),
            "parsed document"
        );
        doc
    }

    fn parse_decree(&self, record: &RawDocumentRecord, meta: Metadata) -> ParsedDocument {
        let normalized = normalize_markup(record.markup());
        let blocks = segment_decree(&normalized.text, &self.patterns);

        let preambulo = analyze_preamble(&blocks.preamble, &self.patterns);
        let cuerpo = DecreeStrategy.extract(&blocks.body, &self.patterns);
        let firmas = extract_signatures(&blocks.tail, &self.patterns);
        let nota = extract_note(&blocks.tail, &self.patterns);

        // Searched in the full text so the footnote survives a missed tail
        let (pie, resto) = extract_footnote(&normalized.text, &self.patterns);

        ParsedDocument {
            meta,
            preambulo,
            cuerpo,
            firmas,
            nota,
            anexos: extract_annexes(normalized.tree.as_ref(), &self.config.annex_label),
            pie,
            resto,
        }
    }

    fn parse_law(&self, record: &RawDocumentRecord, meta: Metadata) -> ParsedDocument {
        let normalized = normalize_markup(record.markup());
        let text = &normalized.text;

        // Laws have no separate tail region; the whole text stands in for it
        let cuerpo = LawStrategy.extract(text, &self.patterns);
        let firmas = extract_signatures(text, &self.patterns);
        let nota = extract_note(text, &self.patterns);
        let (pie, resto) = extract_footnote(text, &self.patterns);

        ParsedDocument {
            meta,
            preambulo: Preamble::default(),
            cuerpo,
            firmas,
            nota,
            anexos: extract_annexes(normalized.tree.as_ref(), &self.config.annex_label),
            pie,
            resto,
        }
    }
}
