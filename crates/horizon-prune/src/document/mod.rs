//! Reference HTML document and the selector query seam.

mod query;
mod reference;

pub use query::DomQuery;
pub use reference::ReferenceDocument;
