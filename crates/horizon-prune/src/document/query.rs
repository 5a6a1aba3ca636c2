//! Selector query provider trait.

use crate::error::QueryError;

/// Answers "how many elements match this selector" for a parsed document.
///
/// Implementations must accept arbitrary selector text. Text that is not a
/// valid selector yields [`QueryError`], never a panic.
pub trait DomQuery {
    /// Count the elements matching `selector`.
    fn count_matches(&self, selector: &str) -> Result<usize, QueryError>;

    /// Check whether at least one element matches `selector`.
    fn has_match(&self, selector: &str) -> Result<bool, QueryError> {
        Ok(self.count_matches(selector)? > 0)
    }
}

impl<T: DomQuery + ?Sized> DomQuery for &T {
    fn count_matches(&self, selector: &str) -> Result<usize, QueryError> {
        (**self).count_matches(selector)
    }

    fn has_match(&self, selector: &str) -> Result<bool, QueryError> {
        (**self).has_match(selector)
    }
}
