//! Error types for the parser.
//!
//! Uses the dual-error pattern: the parser itself never fails on document
//! content (it degrades to empty or partial structures), while `ParserError`
//! covers the surrounding I/O, record-shape and configuration layers.

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum ParserError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Input record does not have the expected shape.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A configured pattern failed to compile.
    #[error("Invalid pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration value is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParserError::InvalidRecord("expected a JSON object".to_string());
        assert_eq!(err.to_string(), "Invalid record: expected a JSON object");
    }

    #[test]
    fn test_invalid_pattern_display() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ParserError::InvalidPattern {
            name: "body_anchor".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid pattern 'body_anchor':"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ParserError::Config("jobs must be at least 1".to_string());
        assert!(err.to_string().contains("jobs must be at least 1"));
    }
}
