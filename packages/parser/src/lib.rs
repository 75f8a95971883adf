//! Normas Parser - Structure parser for Argentine legislation.
//!
//! This crate turns raw registry records for laws (leyes) and executive
//! decrees (decretos), published as loose HTML, into a normalized tree:
//! preamble, titles → chapters → articles, signatures, note, footnote and
//! annex links.
//!
//! # Example
//!
//! ```
//! use normas_parser::{DocumentParser, ParserConfig, RawDocumentRecord};
//!
//! let parser = DocumentParser::new(ParserConfig::default()).unwrap();
//! let record = RawDocumentRecord::from_json(
//!     r#"{"id": 1, "tipoNorma": "Ley", "textoNorma": "ARTÍCULO 1°.- Apruébase.<br>ARTÍCULO 2°.- Comuníquese."}"#,
//! )
//! .unwrap();
//!
//! let doc = parser.parse(&record);
//! assert_eq!(doc.article_count(), 2);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and the YAML parser profile
//! - [`types`]: Input record and output tree types
//! - [`error`]: Error types and Result alias
//! - [`normalize`]: Markup to plain-text normalization
//! - [`patterns`]: Compiled matchers and line heuristics
//! - [`segment`]: Preamble / body / tail segmentation of decrees
//! - [`preamble`]: VISTO and CONSIDERANDO clauses
//! - [`body`]: Title, chapter and article extraction
//! - [`tail`]: Signatures, note and footnote
//! - [`annex`]: Annex links
//! - [`meta`]: Metadata projection
//! - [`parser`]: Document parser tying the stages together
//! - [`batch`]: NDJSON batch driver
//! - [`cli`]: Command-line interface

pub mod annex;
pub mod batch;
pub mod body;
pub mod cli;
pub mod config;
pub mod error;
pub mod meta;
pub mod normalize;
pub mod parser;
pub mod patterns;
pub mod preamble;
pub mod segment;
pub mod tail;
pub mod types;

// Re-export main types
pub use parser::DocumentParser;

// Re-export commonly used items
pub use batch::{run_batch, BatchOptions, BatchSummary};
pub use config::ParserConfig;
pub use error::{ParserError, Result};
pub use types::{Article, Chapter, DocumentType, ParsedDocument, RawDocumentRecord, Title};
