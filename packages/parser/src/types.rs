//! Core data types: the raw input record and the parsed document tree.
//!
//! Output field names follow the JSON contract shared with the ingestion
//! and reconstruction services (`preambulo`, `cuerpo`, `firmas`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ParserError, Result};

/// Source field holding the raw markup.
pub const FIELD_TEXT: &str = "textoNorma";

/// Source field holding the document-type tag.
pub const FIELD_TYPE: &str = "tipoNorma";

/// Source field holding the record identifier.
pub const FIELD_ID: &str = "id";

/// Document types with a dedicated extraction strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentType {
    /// Ley (legislative act).
    Law,

    /// Decreto (executive decree).
    Decree,

    /// Any other instrument; carries the original tag.
    Unknown(String),
}

impl DocumentType {
    /// Parse from the `tipoNorma` tag.
    ///
    /// # Examples
    /// ```
    /// use normas_parser::types::DocumentType;
    ///
    /// assert_eq!(DocumentType::from_tag("Ley"), DocumentType::Law);
    /// assert_eq!(DocumentType::from_tag(" decreto "), DocumentType::Decree);
    /// assert_eq!(
    ///     DocumentType::from_tag("Resolución"),
    ///     DocumentType::Unknown("Resolución".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "ley" | "law" => Self::Law,
            "decreto" | "decree" => Self::Decree,
            _ => Self::Unknown(tag.to_string()),
        }
    }

    /// Get the canonical tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Law => "Ley",
            Self::Decree => "Decreto",
            Self::Unknown(tag) => tag,
        }
    }
}

/// One input record, as read from the registry export.
///
/// The record is kept as the raw JSON object so that passthrough fields can
/// be projected without a typed schema for every source column.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocumentRecord {
    fields: Map<String, Value>,
}

impl RawDocumentRecord {
    /// Build a record from a decoded JSON value.
    ///
    /// Fails when the value is not an object, or when the markup or type
    /// fields are present with a non-string value.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(fields) = value else {
            return Err(ParserError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        };

        for key in [FIELD_TEXT, FIELD_TYPE] {
            match fields.get(key) {
                None | Some(Value::Null) | Some(Value::String(_)) => {}
                Some(other) => {
                    return Err(ParserError::InvalidRecord(format!(
                        "field '{key}' must be a string, got {}",
                        json_kind(other)
                    )));
                }
            }
        }

        Ok(Self { fields })
    }

    /// Decode a record from one JSON line.
    pub fn from_json(line: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(line)?)
    }

    /// Record identifier, if present.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.fields.get(FIELD_ID).filter(|v| !v.is_null())
    }

    /// Document type selected by `tipoNorma`.
    #[must_use]
    pub fn document_type(&self) -> DocumentType {
        let tag = self
            .fields
            .get(FIELD_TYPE)
            .and_then(Value::as_str)
            .unwrap_or_default();
        DocumentType::from_tag(tag)
    }

    /// Raw markup body; empty when absent.
    #[must_use]
    pub fn markup(&self) -> &str {
        self.fields
            .get(FIELD_TEXT)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Look up any source field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Projected source metadata.
pub type Metadata = Map<String, Value>;

/// Preamble clauses of a decree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preamble {
    /// Place/date fragment, e.g. "Ciudad de Buenos Aires, 05/06/2024".
    pub contexto: Option<String>,

    /// VISTO clause.
    pub visto: Option<String>,

    /// CONSIDERANDO clause.
    pub considerando: Option<String>,
}

impl Preamble {
    /// Check whether no clause was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexto.is_none() && self.visto.is_none() && self.considerando.is_none()
    }
}

/// A single article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article ordinal.
    pub art: u32,

    /// Article text.
    pub texto: String,

    /// Nested articles. Always empty for text-extracted documents.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subarticulos: Vec<Article>,
}

impl Article {
    /// Create a new article.
    #[must_use]
    pub fn new(art: u32, texto: impl Into<String>) -> Self {
        Self {
            art,
            texto: texto.into(),
            subarticulos: Vec::new(),
        }
    }
}

/// A chapter (capítulo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter ordinal as written (roman or arabic); `None` for a synthetic chapter.
    pub capitulo: Option<String>,

    /// Chapter name.
    pub titulo: Option<String>,

    /// Articles in source order.
    pub articulos: Vec<Article>,
}

/// A title (título). Documents without titles get one synthetic title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Title ordinal as written; `None` for the synthetic wrapper.
    pub titulo: Option<String>,

    /// Title name.
    pub nombre: Option<String>,

    /// Chapters in source order.
    pub capitulos: Vec<Chapter>,

    /// Articles placed directly under the title.
    pub articulos: Vec<Article>,
}

impl Title {
    /// Create the title-less wrapper around a flat article list.
    #[must_use]
    pub fn untitled(articulos: Vec<Article>) -> Self {
        Self {
            articulos,
            ..Self::default()
        }
    }

    /// Iterate over every article in the title, chapters first.
    pub fn all_articles(&self) -> impl Iterator<Item = &Article> {
        self.articulos
            .iter()
            .chain(self.capitulos.iter().flat_map(|c| c.articulos.iter()))
    }
}

/// A linked annex document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annex {
    /// Sequential label ("Anexo 1").
    pub nombre: String,

    /// Link target as written in the markup.
    pub url: String,
}

/// Closing footnote of a published instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    /// Edition date (dd/mm/yyyy).
    pub edicion: String,

    /// Instrument number ("1234/24").
    pub numero: String,

    /// Validity date (dd/mm/yyyy).
    pub validez: String,
}

/// The normalized record produced for each input record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDocument {
    pub meta: Metadata,
    pub preambulo: Preamble,
    pub cuerpo: Vec<Title>,
    pub firmas: Vec<String>,
    pub nota: Option<String>,
    pub anexos: Vec<Annex>,
    pub pie: Option<Footnote>,
    pub resto: Option<String>,
}

impl ParsedDocument {
    /// Metadata-only skeleton with every structural field empty.
    #[must_use]
    pub fn skeleton(meta: Metadata) -> Self {
        Self {
            meta,
            preambulo: Preamble::default(),
            cuerpo: Vec::new(),
            firmas: Vec::new(),
            nota: None,
            anexos: Vec::new(),
            pie: None,
            resto: None,
        }
    }

    /// Total number of articles across the body tree.
    #[must_use]
    pub fn article_count(&self) -> usize {
        self.cuerpo.iter().map(|t| t.all_articles().count()).sum()
    }
}
