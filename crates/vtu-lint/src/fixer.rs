//! Text-edit construction and application helpers.
//!
//! The engine only ever produces edits through these helpers, which keeps the
//! "no overlapping edits within one fix" contract in one place. Applying
//! fixes is normally the host's job; [`apply_fixes`] is provided for hosts
//! and tests that want the reference behavior: every non-conflicting fix in
//! one pass, each fix atomic.

use crate::ast::{NodeId, Span, SyntaxTree};
use crate::diagnostic::{Diagnostic, TextEdit};

/// An edit inserting `text` immediately before the node.
pub(crate) fn insert_before(tree: &SyntaxTree, node: NodeId, text: &str) -> TextEdit {
    let start = tree.span(node).start;
    TextEdit {
        range: Span::new(start, start),
        replacement: text.to_string(),
    }
}

/// An edit inserting `text` immediately after the node.
pub(crate) fn insert_after(tree: &SyntaxTree, node: NodeId, text: &str) -> TextEdit {
    let end = tree.span(node).end;
    TextEdit {
        range: Span::new(end, end),
        replacement: text.to_string(),
    }
}

/// An edit replacing a span with `text`.
pub(crate) fn replace_span(span: Span, text: &str) -> TextEdit {
    TextEdit {
        range: span,
        replacement: text.to_string(),
    }
}

/// An edit deleting a whole object property. When a comma follows the
/// property (ignoring whitespace) it is deleted too, so the fixed source
/// stays syntactically valid.
pub(crate) fn delete_property(source: &str, property: Span) -> TextEdit {
    let mut end = property.end;
    let rest = &source.as_bytes()[end..];
    let trailing_ws = rest
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    if rest.get(trailing_ws) == Some(&b',') {
        end += trailing_ws + 1;
    }
    TextEdit {
        range: Span::new(property.start, end),
        replacement: String::new(),
    }
}

/// Applies one fix's edits to `source`. Edits are pre-sorted and
/// non-overlapping, so a single right-to-left pass suffices.
fn apply_one(source: &str, edits: &[TextEdit]) -> String {
    let mut out = source.to_string();
    for edit in edits.iter().rev() {
        out.replace_range(edit.range.start..edit.range.end, &edit.replacement);
    }
    out
}

/// Applies every applicable fix from `diagnostics` in one pass.
///
/// Fixes are taken in source order; a fix whose envelope starts before the
/// end of the previously applied one is skipped for this pass (it may apply
/// on a later pass, after re-linting the partially fixed output). Returns the
/// new text and how many fixes were applied.
pub fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> (String, usize) {
    let mut fixes: Vec<_> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();
    fixes.sort_by_key(|fix| {
        let env = fix.envelope();
        (env.start, env.end)
    });

    let mut applied: Vec<&TextEdit> = Vec::new();
    let mut last_end: Option<usize> = None;
    let mut count = 0;
    for fix in fixes {
        let env = fix.envelope();
        if let Some(end) = last_end {
            if env.start < end {
                continue;
            }
        }
        applied.extend(fix.edits.iter());
        last_end = Some(env.end.max(last_end.unwrap_or(0)));
        count += 1;
    }
    applied.sort_by_key(|edit| (edit.range.start, edit.range.end));

    let owned: Vec<TextEdit> = applied.into_iter().cloned().collect();
    (apply_one(source, &owned), count)
}
