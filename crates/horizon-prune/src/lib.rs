//! Remove CSS rules that match nothing in a reference HTML document.
//!
//! This crate provides a stylesheet pruner, featuring:
//!
//! - **Lossless tree**: Stylesheets serialize back byte for byte, minus what was pruned
//! - **Branch-level pruning**: Unused branches of a selector list are dropped individually
//! - **Pseudo handling**: Pseudo-classes and pseudo-elements are tested against their subject
//! - **Preserve regions**: `/* pru:startPreserve(flag) */` comments switch pruning off
//! - **Selector filters**: Rewrite selectors before they are looked up
//!
//! # Example
//!
//! ```
//! use horizon_prune::prelude::*;
//!
//! let config = PruneConfig::new(r#"<div class="foo"></div>"#);
//! let css = prune_css(".foo { color: blue }\n.bar { color: red }\n", &config)?;
//!
//! assert_eq!(css, ".foo { color: blue }\n");
//! # Ok::<(), horizon_prune::Error>(())
//! ```

pub mod config;
pub mod document;
pub mod preserve;
pub mod pruner;
pub mod selector;
pub mod tree;

mod error;
mod syntax;

pub use config::{PreserveFlags, PruneConfig, PruneOptions};
pub use error::{Error, QueryError, Result};
pub use pruner::{PruneReport, Pruner};
pub use tree::Stylesheet;

/// Prune CSS text against the configured reference HTML.
///
/// Builds a [`Pruner`] for a single use. To prune several stylesheets against
/// the same document, build the pruner once and call [`Pruner::prune_css`].
pub fn prune_css(css: &str, config: &PruneConfig) -> Result<String> {
    Ok(Pruner::new(config)?.prune_css(css))
}

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::config::{PreserveFlags, PruneConfig, PruneOptions};
    pub use crate::document::{DomQuery, ReferenceDocument};
    pub use crate::preserve::{PreserveRegion, PreserveState};
    pub use crate::pruner::{PruneReport, PruneRun, Pruner};
    pub use crate::selector::{SelectorClassifier, split_branches, strip_pseudo};
    pub use crate::tree::{Node, NodeKind, Parent, Rule, Stylesheet, Visit};
    pub use crate::{Error, Result, prune_css};
}
