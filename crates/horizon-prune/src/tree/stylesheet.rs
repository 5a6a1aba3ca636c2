//! Stylesheet root.

use std::fmt;
use std::path::{Path, PathBuf};

use super::node::{Node, NodeKind, Rule};
use super::walk::{Parent, Visit, walk_nodes};
use crate::{Error, Result};

/// A parsed stylesheet.
///
/// Formatting the stylesheet with `Display` reproduces the source text with
/// any mutations applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Top-level nodes.
    pub nodes: Vec<Node>,
    /// Whitespace after the last node.
    pub after: String,
    /// Source file path, when loaded from disk.
    pub source_path: Option<PathBuf>,
}

impl Stylesheet {
    /// Parse a stylesheet from CSS text.
    pub fn parse(css: &str) -> Self {
        let (nodes, after) = super::parser::parse_nodes(css);
        Self {
            nodes,
            after,
            source_path: None,
        }
    }

    /// Load a stylesheet from a CSS file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let mut sheet = Self::parse(&content);
        sheet.source_path = Some(path.to_path_buf());
        Ok(sheet)
    }

    /// Visit every node depth-first in document order.
    ///
    /// The visitor receives the node and the at-rule it sits in, and may
    /// mutate the node or ask for its removal.
    pub fn walk<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Node, Parent<'_>) -> Visit,
    {
        walk_nodes(&mut self.nodes, Parent::Root, &mut visit);
    }

    /// Collect every rule in document order, including nested ones.
    pub fn rules(&self) -> Vec<&Rule> {
        fn collect<'a>(nodes: &'a [Node], out: &mut Vec<&'a Rule>) {
            for node in nodes {
                match &node.kind {
                    NodeKind::Rule(rule) => out.push(rule),
                    NodeKind::AtRule(at_rule) => collect(at_rule.children(), out),
                    _ => {}
                }
            }
        }

        let mut out = vec![];
        collect(&self.nodes, &mut out);
        out
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the stylesheet has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{}", node)?;
        }
        f.write_str(&self.after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn untouched_sheet_round_trips() {
        let css = "\n@media print {\n  .a { color: red }\n}\n/* note */\n.b, .c:hover { color: blue }\n";
        let sheet = Stylesheet::parse(css);

        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.to_string(), css);
    }

    #[test]
    fn rules_include_nested() {
        let sheet = Stylesheet::parse(".a {} @media print { .b {} } @font-face { font-family: x }");
        let selectors: Vec<_> = sheet.rules().iter().map(|r| r.selector.as_str()).collect();

        assert_eq!(selectors, vec![".a", ".b"]);
    }

    #[test]
    fn selector_mutation_is_serialized() {
        let mut sheet = Stylesheet::parse(".a, .b { color: red }");
        sheet.walk(|node, _| {
            if let Some(rule) = node.as_rule_mut() {
                rule.selector = ".a".to_string();
            }
            Visit::Keep
        });

        assert_eq!(sheet.to_string(), ".a { color: red }");
    }

    #[test]
    fn from_file_records_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ".a {{ color: red }}").unwrap();

        let sheet = Stylesheet::from_file(file.path()).unwrap();

        assert_eq!(sheet.source_path.as_deref(), Some(file.path()));
        assert_eq!(sheet.to_string(), ".a { color: red }");
    }

    #[test]
    fn from_file_missing() {
        let result = Stylesheet::from_file("/nonexistent/styles.css");

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn empty_sheet() {
        let sheet = Stylesheet::parse("");

        assert!(sheet.is_empty());
        assert_eq!(sheet.to_string(), "");
    }
}
