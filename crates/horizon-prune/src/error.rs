//! Error types for the pruner.

use std::path::PathBuf;

/// Result type alias for pruning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a pruning run.
///
/// Selector queries never surface here: a selector the DOM cannot evaluate is
/// reported as a [`QueryError`] and treated as "no match" by the classifier.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The reference HTML was rejected in strict mode.
    #[error("Malformed reference HTML ({count} parse errors), first: {first}")]
    MalformedHtml { count: usize, first: String },

    /// The preserve marker prefix produced an unusable pattern.
    #[error("Invalid preserve marker prefix '{prefix}': {source}")]
    MarkerPattern {
        prefix: String,
        #[source]
        source: regex::Error,
    },

    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a malformed HTML error from the parser's error list.
    pub fn malformed_html<S: AsRef<str>>(errors: &[S]) -> Self {
        Self::MalformedHtml {
            count: errors.len(),
            first: errors
                .first()
                .map(|e| e.as_ref().to_string())
                .unwrap_or_default(),
        }
    }

    /// Create a marker pattern error.
    pub fn marker_pattern(prefix: impl Into<String>, source: regex::Error) -> Self {
        Self::MarkerPattern {
            prefix: prefix.into(),
            source,
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A selector the DOM query provider could not evaluate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The selector failed to parse.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

impl QueryError {
    /// Create an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}
