//! Deciding whether a selector branch is used by the reference document.

use std::collections::HashMap;
use std::fmt;

use super::{is_standalone_negation, strip_pseudo};
use crate::document::DomQuery;

/// Caller-supplied rewrite applied to a stripped selector before querying.
pub type SelectorFilter = dyn Fn(&str) -> String + Send + Sync;

/// Classifies selector branches as used or unused.
///
/// Results are cached per final selector text, so repeated selectors across
/// a stylesheet only hit the document once. A classifier belongs to one
/// pruning run.
pub struct SelectorClassifier<'a> {
    document: &'a dyn DomQuery,
    filter: Option<&'a SelectorFilter>,
    cache: HashMap<String, bool>,
}

impl<'a> SelectorClassifier<'a> {
    /// Create a classifier querying `document`.
    pub fn new(document: &'a dyn DomQuery) -> Self {
        Self {
            document,
            filter: None,
            cache: HashMap::new(),
        }
    }

    /// Apply `filter` to every stripped selector before it is queried.
    pub fn with_filter(mut self, filter: Option<&'a SelectorFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Check whether a single selector branch matches anything.
    ///
    /// Standalone negations are always used. Everything else is stripped of
    /// pseudo selectors, passed through the filter, and queried; a selector
    /// the document cannot evaluate counts as unused.
    pub fn is_used(&mut self, branch: &str) -> bool {
        if is_standalone_negation(branch) {
            tracing::trace!("Keeping standalone negation '{}'", branch.trim());
            return true;
        }

        let stripped = strip_pseudo(branch);
        let selector = match self.filter {
            Some(filter) => filter(&stripped),
            None => stripped,
        };
        let selector = selector.trim();

        if let Some(&used) = self.cache.get(selector) {
            return used;
        }

        let used = self.query(selector);
        self.cache.insert(selector.to_string(), used);
        used
    }

    /// Number of distinct selectors queried so far.
    pub fn queried(&self) -> usize {
        self.cache.len()
    }

    fn query(&self, selector: &str) -> bool {
        match self.document.has_match(selector) {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!("Treating selector as unused: {}", e);
                false
            }
        }
    }
}

impl fmt::Debug for SelectorClassifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorClassifier")
            .field("has_filter", &self.filter.is_some())
            .field("queried", &self.cache.len())
            .finish()
    }
}
