//! The rule pruner: walks a stylesheet and drops rules nothing uses.

use std::fmt;
use std::sync::Arc;

use crate::config::{PreserveFlags, PruneConfig};
use crate::document::ReferenceDocument;
use crate::preserve::{MarkerPattern, PreserveRegion};
use crate::selector::{SelectorClassifier, SelectorFilter, split_branches};
use crate::tree::{Node, NodeKind, Parent, Rule, Stylesheet, Visit};
use crate::Result;

/// Counters collected during one pruning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Rules visited.
    pub rules_seen: usize,
    /// Rules removed because no branch matched.
    pub rules_removed: usize,
    /// Rules whose selector lost some branches.
    pub rules_rewritten: usize,
    /// Rules left alone inside a preserve region.
    pub rules_preserved: usize,
    /// Rules left alone inside `@keyframes`.
    pub keyframes_skipped: usize,
    /// Selector branches dropped, across removed and rewritten rules.
    pub branches_removed: usize,
    /// Distinct selectors sent to the document.
    pub selectors_queried: usize,
}

/// Prunes stylesheets against one reference document.
///
/// The pruner itself is immutable; each call to [`Pruner::run`],
/// [`Pruner::visitor`] or [`Pruner::prune`] starts a fresh run with its own
/// preserve state and query cache.
pub struct Pruner {
    document: ReferenceDocument,
    flags: PreserveFlags,
    markers: MarkerPattern,
    filter: Option<Arc<SelectorFilter>>,
}

impl Pruner {
    /// Parse the reference HTML and prepare the marker pattern.
    ///
    /// Fails if `strict_html` is set and the HTML is malformed, or if the
    /// marker prefix cannot be compiled.
    pub fn new(config: &PruneConfig) -> Result<Self> {
        let document = if config.options.strict_html {
            ReferenceDocument::parse_strict(&config.html)?
        } else {
            ReferenceDocument::parse(&config.html)
        };

        Self::with_document(document, config)
    }

    /// Use an already parsed document; `config.html` is ignored.
    pub fn with_document(document: ReferenceDocument, config: &PruneConfig) -> Result<Self> {
        Ok(Self {
            document,
            flags: config.options.preserve_flags.clone(),
            markers: MarkerPattern::new(&config.options.marker_prefix)?,
            filter: config.selector_filter.clone(),
        })
    }

    /// The reference document.
    pub fn document(&self) -> &ReferenceDocument {
        &self.document
    }

    /// Start a run that visits nodes one at a time.
    pub fn run(&self) -> PruneRun<'_> {
        PruneRun {
            classifier: SelectorClassifier::new(&self.document).with_filter(self.filter.as_deref()),
            preserve: PreserveRegion::new(&self.flags, &self.markers),
            report: PruneReport::default(),
        }
    }

    /// A node-visiting function for [`Stylesheet::walk`], backed by a fresh run.
    pub fn visitor(&self) -> impl FnMut(&mut Node, Parent<'_>) -> Visit + '_ {
        let mut run = self.run();
        move |node, parent| run.visit(node, parent)
    }

    /// Prune a stylesheet in place.
    pub fn prune(&self, sheet: &mut Stylesheet) -> PruneReport {
        let mut run = self.run();
        sheet.walk(|node, parent| run.visit(node, parent));
        let report = run.finish();

        tracing::info!(
            "Pruned stylesheet: {} of {} rules removed, {} rewritten, {} selectors queried",
            report.rules_removed,
            report.rules_seen,
            report.rules_rewritten,
            report.selectors_queried
        );

        report
    }

    /// Parse, prune and serialize CSS text.
    pub fn prune_css(&self, css: &str) -> String {
        let mut sheet = Stylesheet::parse(css);
        self.prune(&mut sheet);
        sheet.to_string()
    }
}

impl fmt::Debug for Pruner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pruner")
            .field("document", &self.document)
            .field("flags", &self.flags)
            .field("markers", &self.markers)
            .field("selector_filter", &self.filter.is_some())
            .finish()
    }
}

/// State of a single pruning run.
#[derive(Debug)]
pub struct PruneRun<'a> {
    classifier: SelectorClassifier<'a>,
    preserve: PreserveRegion<'a>,
    report: PruneReport,
}

impl PruneRun<'_> {
    /// Handle one node in document order.
    ///
    /// Comments drive the preserve state, rules are classified, and every
    /// other node passes through.
    pub fn visit(&mut self, node: &mut Node, parent: Parent<'_>) -> Visit {
        match &mut node.kind {
            NodeKind::Comment(comment) => {
                self.preserve.on_comment(&comment.text);
                Visit::Keep
            }
            NodeKind::Rule(rule) => self.visit_rule(rule, parent),
            NodeKind::AtRule(_) | NodeKind::Other(_) => Visit::Keep,
        }
    }

    /// Counters so far.
    pub fn report(&self) -> PruneReport {
        PruneReport {
            selectors_queried: self.classifier.queried(),
            ..self.report
        }
    }

    /// End the run and return its counters.
    pub fn finish(self) -> PruneReport {
        self.report()
    }

    fn visit_rule(&mut self, rule: &mut Rule, parent: Parent<'_>) -> Visit {
        self.report.rules_seen += 1;

        if self.preserve.is_suspended() {
            self.report.rules_preserved += 1;
            return Visit::Keep;
        }

        if parent.is_keyframes() {
            self.report.keyframes_skipped += 1;
            return Visit::Keep;
        }

        if self.preserve.has_marker(&rule.block) {
            tracing::debug!(
                "Ignoring preserve marker inside the block of '{}'",
                rule.selector
            );
        }

        if rule.selector.trim().is_empty() {
            return Visit::Keep;
        }

        let branches = split_branches(&rule.selector);
        let used: Vec<&str> = branches
            .iter()
            .copied()
            .filter(|branch| self.classifier.is_used(branch))
            .collect();

        if used.is_empty() {
            tracing::debug!("Removing unused rule '{}'", rule.selector);
            self.report.rules_removed += 1;
            self.report.branches_removed += branches.len();
            return Visit::Remove;
        }

        if used.len() < branches.len() {
            let selector = used.join(",");
            tracing::debug!("Rewriting '{}' to '{}'", rule.selector, selector);
            self.report.rules_rewritten += 1;
            self.report.branches_removed += branches.len() - used.len();
            rule.selector = selector;
        }

        Visit::Keep
    }
}
