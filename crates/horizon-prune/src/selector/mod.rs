//! Selector liveness classification.

mod branches;
mod classifier;
mod negation;
mod strip;

pub use branches::split_branches;
pub use classifier::{SelectorClassifier, SelectorFilter};
pub use negation::is_standalone_negation;
pub use strip::strip_pseudo;
