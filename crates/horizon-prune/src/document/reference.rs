//! The parsed HTML document selectors are checked against.

use std::fmt;
use std::path::Path;

use scraper::{Html, Selector};

use super::DomQuery;
use crate::error::QueryError;
use crate::{Error, Result};

/// An immutable, pre-parsed HTML document.
///
/// Built once per pruning run. Queries never mutate it, so it can be asked
/// about any number of selectors in any order.
pub struct ReferenceDocument {
    html: Html,
}

impl ReferenceDocument {
    /// Parse a document, recovering from malformed markup the way browsers do.
    pub fn parse(html: &str) -> Self {
        let html = Html::parse_document(html);
        if !html.errors.is_empty() {
            tracing::debug!(
                "Reference HTML parsed with {} recovered errors",
                html.errors.len()
            );
        }
        Self { html }
    }

    /// Parse a document, failing if the parser had to recover from any error.
    pub fn parse_strict(html: &str) -> Result<Self> {
        let document = Self::parse(html);
        if document.html.errors.is_empty() {
            Ok(document)
        } else {
            Err(Error::malformed_html(document.html.errors.as_slice()))
        }
    }

    /// Read and parse a document from disk.
    pub fn from_file(path: impl AsRef<Path>, strict: bool) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        if strict {
            Self::parse_strict(&content)
        } else {
            Ok(Self::parse(&content))
        }
    }

    /// Errors the HTML parser recovered from.
    pub fn parse_errors(&self) -> impl Iterator<Item = &str> {
        self.html.errors.iter().map(|e| &**e)
    }

    fn compile(selector: &str) -> std::result::Result<Selector, QueryError> {
        Selector::parse(selector)
            .map_err(|e| QueryError::invalid_selector(selector, e.to_string()))
    }
}

impl DomQuery for ReferenceDocument {
    fn count_matches(&self, selector: &str) -> std::result::Result<usize, QueryError> {
        let compiled = Self::compile(selector)?;
        Ok(self.html.select(&compiled).count())
    }

    fn has_match(&self, selector: &str) -> std::result::Result<bool, QueryError> {
        let compiled = Self::compile(selector)?;
        Ok(self.html.select(&compiled).next().is_some())
    }
}

impl fmt::Debug for ReferenceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceDocument")
            .field("parse_errors", &self.html.errors.len())
            .finish_non_exhaustive()
    }
}
