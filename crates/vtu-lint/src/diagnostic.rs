//! Diagnostics and text edits reported by the rules.

use crate::ast::Span;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The rules this crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    MissingAwait,
    NoDeprecatedMountOptions,
    NoDeprecatedSelectors,
    NoDeprecatedWrapperFunctions,
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleId::MissingAwait => write!(f, "missing-await"),
            RuleId::NoDeprecatedMountOptions => write!(f, "no-deprecated-mount-options"),
            RuleId::NoDeprecatedSelectors => write!(f, "no-deprecated-selectors"),
            RuleId::NoDeprecatedWrapperFunctions => {
                write!(f, "no-deprecated-wrapper-functions")
            }
        }
    }
}

/// Stable message identifiers, one set per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageId {
    MissingAwait,
    DeprecatedMountOption,
    UnknownMountOption,
    SyncIsRemoved,
    DeprecatedComponentSelector,
    MemberUsageFromDeprecatedSelector,
    DeprecatedFunction,
}

/// A single replacement of a byte range with new text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub range: Span,
    pub replacement: String,
}

/// The edits attached to one diagnostic. Edits are non-overlapping and the
/// host must apply them atomically, all or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    pub edits: Vec<TextEdit>,
}

impl Fix {
    /// Builds a fix, sorting edits by position and asserting non-overlap.
    /// Overlapping edits within one fix are a rule bug, so this is a debug
    /// assertion rather than a recoverable error.
    pub(crate) fn new(mut edits: Vec<TextEdit>) -> Self {
        edits.sort_by_key(|edit| (edit.range.start, edit.range.end));
        debug_assert!(edits
            .windows(2)
            .all(|pair| pair[0].range.end <= pair[1].range.start));
        Self { edits }
    }

    /// The smallest range covering every edit, used for cross-diagnostic
    /// conflict detection when applying fixes in bulk.
    pub fn envelope(&self) -> Span {
        let start = self.edits.first().map(|e| e.range.start).unwrap_or(0);
        let end = self.edits.last().map(|e| e.range.end).unwrap_or(0);
        Span::new(start, end)
    }
}

/// One reported problem.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub rule: RuleId,
    pub message_id: MessageId,
    /// Rendered, human-readable message.
    pub message: String,
    /// The node the diagnostic points at.
    pub span: Span,
    /// Interpolation data keyed by placeholder name.
    pub data: BTreeMap<String, String>,
    /// A mechanical rewrite, when one is safe to offer.
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub(crate) fn new(rule: RuleId, message_id: MessageId, span: Span, message: String) -> Self {
        Self {
            rule,
            message_id,
            message,
            span,
            data: BTreeMap::new(),
            fix: None,
        }
    }

    pub(crate) fn with_data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn with_fix(mut self, edits: Vec<TextEdit>) -> Self {
        self.fix = Some(Fix::new(edits));
        self
    }
}
