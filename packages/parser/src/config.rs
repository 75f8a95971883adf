//! Configuration constants and the per-source parser profile.
//!
//! The defaults describe the InfoLEG publication format. A YAML profile can
//! override any of them, which is how a different jurisdiction or source
//! format gets its own heading denylist or closing formulas.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ParserError, Result};

/// Default body-start anchor: the authority declaration followed, eventually,
/// by the enactment verb and a colon.
pub const DEFAULT_BODY_ANCHOR: &str = r"(?is)\bEL\s+PRESIDENTE\b.*?\bDECRETA\s*:";

/// Default contextual date/place shape in decree preambles.
pub const DEFAULT_CONTEXT_PATTERN: &str = r"Ciudad.*?\d{4}";

/// Default label prefix for annex links.
pub const DEFAULT_ANNEX_LABEL: &str = "Anexo";

/// Number of input lines the batch driver reads before dispatching to workers.
pub const BATCH_CHUNK_SIZE: usize = 256;

/// Default closing-formula keywords that end the operative text of a decree.
pub const DEFAULT_CLOSING_KEYWORDS: &[&str] = &["Comuníquese", "Publíquese", "Archívese", "Dese a"];

/// Default heading keywords that must never be read as signature lines.
pub const DEFAULT_HEADING_DENYLIST: &[&str] =
    &["CAPÍTULO", "TÍTULO", "SECCIÓN", "LIBRO", "PARTE", "ANEXO"];

/// Default allowlist of metadata fields copied from the source record.
pub const DEFAULT_META_FIELDS: &[&str] = &[
    "id",
    "jurisdiccion",
    "claseNorma",
    "tipoNorma",
    "sancion",
    "publicacion",
    "idNormas",
    "tituloSumario",
    "tituloResumido",
    "nroBoletin",
    "pagBoletin",
];

/// Source-format profile for the parser.
///
/// Every field has a default, so a YAML profile only needs to list what it
/// changes:
///
/// ```yaml
/// heading_denylist: [CAPÍTULO, TÍTULO, SECCIÓN, DISPOSICIONES]
/// annex_label: Annex
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Regex locating the end of a decree preamble.
    pub body_anchor: String,

    /// Regex for the contextual place/date fragment of the preamble.
    pub context_pattern: String,

    /// Keywords that close the operative body of a decree.
    pub closing_keywords: Vec<String>,

    /// First words that disqualify a line from being a signature line.
    pub heading_denylist: Vec<String>,

    /// Label prefix for annexes ("Anexo 1", "Anexo 2", ...).
    pub annex_label: String,

    /// Source fields projected into the output metadata.
    pub meta_fields: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            body_anchor: DEFAULT_BODY_ANCHOR.to_string(),
            context_pattern: DEFAULT_CONTEXT_PATTERN.to_string(),
            closing_keywords: to_strings(DEFAULT_CLOSING_KEYWORDS),
            heading_denylist: to_strings(DEFAULT_HEADING_DENYLIST),
            annex_label: DEFAULT_ANNEX_LABEL.to_string(),
            meta_fields: to_strings(DEFAULT_META_FIELDS),
        }
    }
}

impl ParserConfig {
    /// Parse a profile from YAML text.
    ///
    /// # Examples
    /// ```
    /// use normas_parser::config::ParserConfig;
    ///
    /// let config = ParserConfig::from_yaml_str("annex_label: Annex\n").unwrap();
    /// assert_eq!(config.annex_label, "Annex");
    /// assert!(!config.heading_denylist.is_empty());
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a profile from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        tracing::debug!(path = %path.display(), "loaded parser profile");
        Ok(config)
    }

    /// Load the profile at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject profiles that would silently disable a pipeline stage.
    pub fn validate(&self) -> Result<()> {
        if self.body_anchor.trim().is_empty() {
            return Err(ParserError::Config("body_anchor must not be empty".into()));
        }
        if self.closing_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ParserError::Config(
                "closing_keywords must not contain empty entries".into(),
            ));
        }
        if self.heading_denylist.iter().any(|k| k.trim().is_empty()) {
            return Err(ParserError::Config(
                "heading_denylist must not contain empty entries".into(),
            ));
        }
        Ok(())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
