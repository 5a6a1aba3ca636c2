//! Comment-driven preserve regions.
//!
//! A comment containing `prefix:startPreserve(flag)` suspends pruning until a
//! later `prefix:endPreserve(flag)`, provided `flag` is enabled in the run's
//! preserve flags. Markers naming unknown or disabled flags are ordinary
//! comments.

use regex::Regex;

use crate::config::PreserveFlags;
use crate::{Error, Result};

/// Default marker prefix (`/* pru:startPreserve(flag) */`).
pub const DEFAULT_MARKER_PREFIX: &str = "pru";

/// Whether pruning is currently enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PreserveState {
    /// Rules are classified and pruned.
    #[default]
    Active,
    /// Rules are left untouched.
    Suspended,
}

/// A recognized marker action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerAction {
    /// `startPreserve`
    StartPreserve,
    /// `endPreserve`
    EndPreserve,
}

impl MarkerAction {
    /// Parse an action name as written in a marker.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "startPreserve" => Some(Self::StartPreserve),
            "endPreserve" => Some(Self::EndPreserve),
            _ => None,
        }
    }

    /// State the machine moves to when this action fires.
    pub fn target(&self) -> PreserveState {
        match self {
            Self::StartPreserve => PreserveState::Suspended,
            Self::EndPreserve => PreserveState::Active,
        }
    }
}

/// A `prefix:action(flag)` occurrence found in a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'t> {
    /// Action name as written.
    pub action: &'t str,
    /// Flag name as written.
    pub flag: &'t str,
}

/// Compiled marker pattern for a given prefix.
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    regex: Regex,
}

impl MarkerPattern {
    /// Build the pattern for `prefix`.
    pub fn new(prefix: &str) -> Result<Self> {
        let pattern = format!(
            r"{}:([A-Za-z0-9_]+)\(([A-Za-z0-9_]+)\)",
            regex::escape(prefix)
        );
        let regex = Regex::new(&pattern).map_err(|e| Error::marker_pattern(prefix, e))?;
        Ok(Self { regex })
    }

    /// Find the first marker in comment text.
    pub fn find<'t>(&self, text: &'t str) -> Option<Marker<'t>> {
        let captures = self.regex.captures(text)?;
        Some(Marker {
            action: captures.get(1)?.as_str(),
            flag: captures.get(2)?.as_str(),
        })
    }
}

/// The preserve state machine for one pruning run.
#[derive(Debug)]
pub struct PreserveRegion<'a> {
    flags: &'a PreserveFlags,
    pattern: &'a MarkerPattern,
    state: PreserveState,
}

impl<'a> PreserveRegion<'a> {
    /// Start in [`PreserveState::Active`].
    pub fn new(flags: &'a PreserveFlags, pattern: &'a MarkerPattern) -> Self {
        Self {
            flags,
            pattern,
            state: PreserveState::Active,
        }
    }

    /// Current state.
    pub fn state(&self) -> PreserveState {
        self.state
    }

    /// Whether pruning is suspended.
    pub fn is_suspended(&self) -> bool {
        self.state == PreserveState::Suspended
    }

    /// Whether `text` contains anything shaped like a marker, enabled or not.
    pub fn has_marker(&self, text: &str) -> bool {
        self.pattern.find(text).is_some()
    }

    /// Feed a comment's text through the machine.
    ///
    /// Returns the action applied, or `None` when the comment is inert.
    pub fn on_comment(&mut self, text: &str) -> Option<MarkerAction> {
        let marker = self.pattern.find(text)?;

        if !self.flags.get(marker.flag).copied().unwrap_or(false) {
            tracing::trace!(
                "Ignoring {}({}): flag not enabled",
                marker.action,
                marker.flag
            );
            return None;
        }

        let action = MarkerAction::from_name(marker.action)?;
        self.state = action.target();
        tracing::debug!("{}({}) -> {:?}", marker.action, marker.flag, self.state);
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(entries: &[(&str, bool)]) -> PreserveFlags {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn finds_markers() {
        let pattern = MarkerPattern::new(DEFAULT_MARKER_PREFIX).unwrap();

        let marker = pattern.find(" pru:startPreserve(bar) ").unwrap();
        assert_eq!(marker.action, "startPreserve");
        assert_eq!(marker.flag, "bar");

        assert!(pattern.find(" plain comment ").is_none());
        assert!(pattern.find("pru:startPreserve()").is_none());
        assert!(pattern.find("pru:startPreserve(a-b)").is_none());
    }

    #[test]
    fn custom_prefix_is_escaped() {
        let pattern = MarkerPattern::new("keep.me").unwrap();

        assert!(pattern.find("keep.me:endPreserve(x)").is_some());
        assert!(pattern.find("keepXme:endPreserve(x)").is_none());
        assert!(pattern.find("pru:endPreserve(x)").is_none());
    }

    #[test]
    fn enabled_flag_toggles_state() {
        let flags = flags(&[("bar", true)]);
        let pattern = MarkerPattern::new(DEFAULT_MARKER_PREFIX).unwrap();
        let mut region = PreserveRegion::new(&flags, &pattern);

        assert_eq!(region.state(), PreserveState::Active);
        assert_eq!(
            region.on_comment(" pru:startPreserve(bar) "),
            Some(MarkerAction::StartPreserve)
        );
        assert!(region.is_suspended());

        assert_eq!(region.on_comment(" unrelated "), None);
        assert!(region.is_suspended());

        assert_eq!(
            region.on_comment("pru:endPreserve(bar)"),
            Some(MarkerAction::EndPreserve)
        );
        assert!(!region.is_suspended());
    }

    #[test]
    fn disabled_or_absent_flags_are_inert() {
        let flags = flags(&[("bar", false)]);
        let pattern = MarkerPattern::new(DEFAULT_MARKER_PREFIX).unwrap();
        let mut region = PreserveRegion::new(&flags, &pattern);

        assert_eq!(region.on_comment("pru:startPreserve(bar)"), None);
        assert_eq!(region.on_comment("pru:startPreserve(baz)"), None);
        assert_eq!(region.state(), PreserveState::Active);
    }

    #[test]
    fn unknown_action_is_inert() {
        let flags = flags(&[("bar", true)]);
        let pattern = MarkerPattern::new(DEFAULT_MARKER_PREFIX).unwrap();
        let mut region = PreserveRegion::new(&flags, &pattern);

        assert_eq!(region.on_comment("pru:pausePreserve(bar)"), None);
        assert_eq!(region.state(), PreserveState::Active);
    }

    #[test]
    fn has_marker_does_not_change_state() {
        let flags = flags(&[("bar", true)]);
        let pattern = MarkerPattern::new(DEFAULT_MARKER_PREFIX).unwrap();
        let region = PreserveRegion::new(&flags, &pattern);

        assert!(region.has_marker("{ /* pru:startPreserve(bar) */ color: red }"));
        assert!(!region.has_marker("{ color: red }"));
        assert!(!region.is_suspended());
    }

    #[test]
    fn markers_for_different_flags_share_state() {
        let flags = flags(&[("a", true), ("b", true)]);
        let pattern = MarkerPattern::new(DEFAULT_MARKER_PREFIX).unwrap();
        let mut region = PreserveRegion::new(&flags, &pattern);

        region.on_comment("pru:startPreserve(a)");
        region.on_comment("pru:startPreserve(b)");
        assert!(region.is_suspended());

        // Any enabled flag ends the region.
        region.on_comment("pru:endPreserve(b)");
        assert!(!region.is_suspended());
        region.on_comment("pru:endPreserve(a)");
        assert!(!region.is_suspended());
    }
}
