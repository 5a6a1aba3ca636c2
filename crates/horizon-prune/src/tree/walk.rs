//! Depth-first traversal with in-place removal.

use super::node::{AtRuleBody, Node, NodeKind};

/// Where a visited node sits in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent<'a> {
    /// Top level of the stylesheet.
    Root,
    /// Inside the block of the named at-rule.
    AtRule(&'a str),
}

impl Parent<'_> {
    /// Whether the parent is a `@keyframes` block.
    pub fn is_keyframes(&self) -> bool {
        match self {
            Parent::Root => false,
            Parent::AtRule(name) => super::is_keyframes(name),
        }
    }
}

/// What to do with a node after visiting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visit {
    /// Keep the node (and descend into it).
    #[default]
    Keep,
    /// Remove the node, its leading whitespace and any children.
    Remove,
}

/// Visit `nodes` in document order, parents before children.
///
/// Each node is visited exactly once. Removed nodes are not descended into.
pub(crate) fn walk_nodes<F>(nodes: &mut Vec<Node>, parent: Parent<'_>, visit: &mut F)
where
    F: FnMut(&mut Node, Parent<'_>) -> Visit,
{
    nodes.retain_mut(|node| {
        if visit(node, parent) == Visit::Remove {
            return false;
        }

        if let NodeKind::AtRule(at_rule) = &mut node.kind
            && let AtRuleBody::Block { nodes: children, .. } = &mut at_rule.body
        {
            walk_nodes(children, Parent::AtRule(&at_rule.name), visit);
        }

        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeType, Stylesheet};

    #[test]
    fn visits_in_document_order() {
        let mut sheet = Stylesheet::parse(
            "/* a */ .one {} @media print { .two {} @supports (x: y) { .three {} } } .four {}",
        );

        let mut seen = vec![];
        sheet.walk(|node, parent| {
            let label = match &node.kind {
                NodeKind::Rule(rule) => rule.selector.clone(),
                NodeKind::AtRule(at_rule) => format!("@{}", at_rule.name),
                NodeKind::Comment(_) => "comment".to_string(),
                NodeKind::Other(raw) => raw.clone(),
            };
            let parent = match parent {
                Parent::Root => "root".to_string(),
                Parent::AtRule(name) => name.to_string(),
            };
            seen.push(format!("{} in {}", label, parent));
            Visit::Keep
        });

        assert_eq!(
            seen,
            vec![
                "comment in root",
                ".one in root",
                "@media in root",
                ".two in media",
                "@supports in media",
                ".three in supports",
                ".four in root",
            ]
        );
    }

    #[test]
    fn removal_drops_leading_whitespace() {
        let mut sheet = Stylesheet::parse("\n.a {}\n\n.b {}\n");

        sheet.walk(|node, _| match node.as_rule() {
            Some(rule) if rule.selector == ".b" => Visit::Remove,
            _ => Visit::Keep,
        });

        assert_eq!(sheet.to_string(), "\n.a {}\n");
    }

    #[test]
    fn removed_at_rule_is_not_descended() {
        let mut sheet = Stylesheet::parse("@media print { .a {} } .b {}");
        let mut rules = 0;

        sheet.walk(|node, _| {
            if node.node_type() == NodeType::Rule {
                rules += 1;
            }
            if node.node_type() == NodeType::AtRule {
                Visit::Remove
            } else {
                Visit::Keep
            }
        });

        assert_eq!(rules, 1);
        assert_eq!(sheet.to_string(), " .b {}");
    }

    #[test]
    fn keyframes_parent() {
        assert!(Parent::AtRule("keyframes").is_keyframes());
        assert!(Parent::AtRule("-webkit-keyframes").is_keyframes());
        assert!(!Parent::AtRule("media").is_keyframes());
        assert!(!Parent::Root.is_keyframes());
    }
}
