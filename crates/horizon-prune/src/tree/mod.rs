//! Lossless CSS syntax tree.

mod node;
mod parser;
mod stylesheet;
mod walk;

pub use node::{AtRule, AtRuleBody, Comment, Node, NodeKind, NodeType, Rule, is_keyframes};
pub use stylesheet::Stylesheet;
pub use walk::{Parent, Visit};
