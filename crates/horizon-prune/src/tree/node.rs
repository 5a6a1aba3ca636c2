//! Stylesheet node types.
//!
//! Every node carries the raw text it was parsed from, so writing an
//! untouched sheet back out reproduces the input byte for byte.

use std::fmt;

/// Names of at-rules whose block holds declarations rather than rules.
const DECLARATION_AT_RULES: &[&str] = &[
    "font-face",
    "page",
    "counter-style",
    "property",
    "font-palette-values",
    "viewport",
    "color-profile",
];

/// Vendor prefixes stripped before comparing at-rule names.
const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

/// The kind of a stylesheet node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Qualified rule (`selector { declarations }`).
    Rule,
    /// At-rule (`@media ...`, `@import ...;`).
    AtRule,
    /// Comment (`/* ... */`).
    Comment,
    /// Anything else the tokenizer produced at rule level.
    Other,
}

/// A single node in a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Whitespace preceding the node. Removed together with the node.
    pub before: String,
    /// Node payload.
    pub kind: NodeKind,
}

impl Node {
    /// Create a node.
    pub fn new(before: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            before: before.into(),
            kind,
        }
    }

    /// Get the node type.
    pub fn node_type(&self) -> NodeType {
        match &self.kind {
            NodeKind::Rule(_) => NodeType::Rule,
            NodeKind::AtRule(_) => NodeType::AtRule,
            NodeKind::Comment(_) => NodeType::Comment,
            NodeKind::Other(_) => NodeType::Other,
        }
    }

    /// Borrow the rule payload, if this is a rule.
    pub fn as_rule(&self) -> Option<&Rule> {
        match &self.kind {
            NodeKind::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    /// Mutably borrow the rule payload, if this is a rule.
    pub fn as_rule_mut(&mut self) -> Option<&mut Rule> {
        match &mut self.kind {
            NodeKind::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    /// Borrow the at-rule payload, if this is an at-rule.
    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match &self.kind {
            NodeKind::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }

    /// Borrow the comment payload, if this is a comment.
    pub fn as_comment(&self) -> Option<&Comment> {
        match &self.kind {
            NodeKind::Comment(comment) => Some(comment),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.before, self.kind)
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Rule(Rule),
    AtRule(AtRule),
    Comment(Comment),
    /// Unrecognized text kept verbatim (stray `;`, `<!--`, a selector with no block).
    Other(String),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Rule(rule) => fmt::Display::fmt(rule, f),
            NodeKind::AtRule(at_rule) => fmt::Display::fmt(at_rule, f),
            NodeKind::Comment(comment) => fmt::Display::fmt(comment, f),
            NodeKind::Other(raw) => f.write_str(raw),
        }
    }
}

/// A qualified rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Selector list, without trailing whitespace.
    pub selector: String,
    /// Whitespace between the selector and the block.
    pub between: String,
    /// Declaration block including its braces. Never interpreted.
    pub block: String,
}

impl Rule {
    /// Create a rule.
    pub fn new(selector: impl Into<String>, block: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            between: " ".to_string(),
            block: block.into(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.selector, self.between, self.block)
    }
}

/// An at-rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Unescaped name without the `@`.
    pub name: String,
    /// Source text of the keyword, including `@`.
    pub raw_name: String,
    /// Everything between the keyword and the block or `;`.
    pub prelude: String,
    /// What follows the prelude.
    pub body: AtRuleBody,
}

impl AtRule {
    /// Name with any vendor prefix removed, lowercased.
    pub fn unprefixed_name(&self) -> String {
        unprefixed(&self.name)
    }

    /// Whether this is a `@keyframes` block (vendor prefixes included).
    pub fn is_keyframes(&self) -> bool {
        is_keyframes(&self.name)
    }

    /// Child nodes, for at-rules whose block holds rules.
    pub fn children(&self) -> &[Node] {
        match &self.body {
            AtRuleBody::Block { nodes, .. } => nodes,
            _ => &[],
        }
    }
}

impl fmt::Display for AtRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.raw_name, self.prelude, self.body)
    }
}

/// The part of an at-rule after its prelude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtRuleBody {
    /// Statement at-rule; holds the `;` or nothing at end of input.
    Statement(String),
    /// Block of nested nodes.
    Block {
        nodes: Vec<Node>,
        /// Whitespace before the closing brace.
        after: String,
        /// Whether the closing brace was present in the source.
        closed: bool,
    },
    /// Declaration block kept verbatim, braces included.
    Opaque(String),
}

impl fmt::Display for AtRuleBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtRuleBody::Statement(raw) | AtRuleBody::Opaque(raw) => f.write_str(raw),
            AtRuleBody::Block {
                nodes,
                after,
                closed,
            } => {
                f.write_str("{")?;
                for node in nodes {
                    fmt::Display::fmt(node, f)?;
                }
                f.write_str(after)?;
                if *closed {
                    f.write_str("}")?;
                }
                Ok(())
            }
        }
    }
}

/// A comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Text between `/*` and `*/`.
    pub text: String,
    /// Source text including delimiters.
    pub raw: String,
}

impl Comment {
    /// Create a comment from its inner text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let raw = format!("/*{}*/", text);
        Self { text, raw }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Lowercase an at-rule name and drop a vendor prefix.
pub(crate) fn unprefixed(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    VENDOR_PREFIXES
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix))
        .map(str::to_string)
        .unwrap_or(lower)
}

/// Whether an at-rule name denotes keyframes.
pub fn is_keyframes(name: &str) -> bool {
    unprefixed(name) == "keyframes"
}

/// Whether an at-rule's block holds declarations instead of rules.
pub(crate) fn holds_declarations(name: &str) -> bool {
    DECLARATION_AT_RULES.contains(&unprefixed(name).as_str())
}
