//! Pruning configuration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::preserve::DEFAULT_MARKER_PREFIX;
use crate::selector::SelectorFilter;

/// Flag name to enabled state, consulted by preserve markers.
pub type PreserveFlags = HashMap<String, bool>;

/// The data-only part of the configuration.
///
/// Can be deserialized from a surrounding tool's config file. Keys accept both
/// `snake_case` and `camelCase` spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneOptions {
    /// Flags that enable preserve markers.
    #[serde(alias = "preserveFlags")]
    pub preserve_flags: PreserveFlags,

    /// Prefix of preserve markers, as in `/* pru:startPreserve(flag) */`.
    #[serde(alias = "markerPrefix")]
    pub marker_prefix: String,

    /// Reject reference HTML the parser had to recover from.
    #[serde(alias = "strictHtml")]
    pub strict_html: bool,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self {
            preserve_flags: PreserveFlags::new(),
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            strict_html: false,
        }
    }
}

/// Everything a pruning run needs.
///
/// # Example
///
/// ```
/// use horizon_prune::PruneConfig;
///
/// let config = PruneConfig::new(r#"<div class="foo"></div>"#)
///     .preserve_flag("legacy", true)
///     .selector_filter(|s| s.replace(".foo.bar", ".foo"));
///
/// assert!(config.options.preserve_flags["legacy"]);
/// ```
#[derive(Clone)]
pub struct PruneConfig {
    /// Reference HTML source.
    pub html: String,
    /// Preserve flags, marker prefix and strictness.
    pub options: PruneOptions,
    /// Rewrite applied to stripped selectors before they are queried.
    pub selector_filter: Option<Arc<SelectorFilter>>,
}

impl PruneConfig {
    /// Create a configuration for the given reference HTML.
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            options: PruneOptions::default(),
            selector_filter: None,
        }
    }

    /// Replace the data-only options.
    pub fn with_options(mut self, options: PruneOptions) -> Self {
        self.options = options;
        self
    }

    /// Set a single preserve flag.
    pub fn preserve_flag(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.options.preserve_flags.insert(name.into(), enabled);
        self
    }

    /// Set several preserve flags.
    pub fn preserve_flags<K, I>(mut self, flags: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, bool)>,
    {
        self.options
            .preserve_flags
            .extend(flags.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    /// Set the preserve marker prefix.
    pub fn marker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.marker_prefix = prefix.into();
        self
    }

    /// Reject reference HTML with parse errors.
    pub fn strict_html(mut self, strict: bool) -> Self {
        self.options.strict_html = strict;
        self
    }

    /// Rewrite stripped selectors before querying.
    pub fn selector_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.selector_filter = Some(Arc::new(filter));
        self
    }
}

impl fmt::Debug for PruneConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PruneConfig")
            .field("html_len", &self.html.len())
            .field("options", &self.options)
            .field("selector_filter", &self.selector_filter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PruneConfig::new("<p></p>");

        assert_eq!(config.html, "<p></p>");
        assert!(config.options.preserve_flags.is_empty());
        assert_eq!(config.options.marker_prefix, "pru");
        assert!(!config.options.strict_html);
        assert!(config.selector_filter.is_none());
    }

    #[test]
    fn builder() {
        let config = PruneConfig::new("")
            .preserve_flags([("a", true), ("b", false)])
            .preserve_flag("c", true)
            .marker_prefix("keep")
            .strict_html(true)
            .selector_filter(|s| s.to_uppercase());

        assert_eq!(config.options.preserve_flags.len(), 3);
        assert!(!config.options.preserve_flags["b"]);
        assert_eq!(config.options.marker_prefix, "keep");
        assert!(config.options.strict_html);

        let filter = config.selector_filter.as_ref().unwrap();
        assert_eq!(filter(".a"), ".A");
    }

    #[test]
    fn options_from_toml() {
        let options: PruneOptions = toml::from_str(
            r#"
            strict_html = true

            [preserve_flags]
            legacy = true
            print = false
            "#,
        )
        .unwrap();

        assert!(options.strict_html);
        assert_eq!(options.marker_prefix, "pru");
        assert!(options.preserve_flags["legacy"]);
        assert!(!options.preserve_flags["print"]);
    }

    #[test]
    fn options_accept_camel_case() {
        let options: PruneOptions = toml::from_str(
            r#"
            markerPrefix = "keep"
            preserveFlags = { bar = true }
            "#,
        )
        .unwrap();

        assert_eq!(options.marker_prefix, "keep");
        assert!(options.preserve_flags["bar"]);
    }

    #[test]
    fn debug_hides_html() {
        let config = PruneConfig::new("<div>secret</div>");
        let debug = format!("{:?}", config);

        assert!(debug.contains("html_len: 17"));
        assert!(!debug.contains("secret"));
    }
}
