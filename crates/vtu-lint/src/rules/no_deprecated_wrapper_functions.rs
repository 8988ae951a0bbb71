//! Disallows wrapper instance methods removed in VTU 2.

use super::RuleContext;
use crate::ast::NodeKind;
use crate::classify::{is_wrapper_rooted, member_callee};
use crate::diagnostic::{Diagnostic, MessageId, RuleId};
use crate::error::Result;
use crate::fixer::{insert_after, replace_span};
use crate::knowledge::DEPRECATED_WRAPPER_FUNCTIONS;

pub(crate) fn run(ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) -> Result<()> {
    for node in ctx.tree.preorder() {
        if !matches!(ctx.tree.kind(node), NodeKind::Call { .. }) {
            continue;
        }
        let Some((object, property, name)) = member_callee(ctx.tree, node) else {
            continue;
        };
        let Some(&suggestion) = DEPRECATED_WRAPPER_FUNCTIONS.get(name) else {
            continue;
        };
        if !is_wrapper_rooted(ctx.tree, object, &ctx.options.wrapper_names) {
            continue;
        }

        let suggestion_text = suggestion
            .map(|s| format!(" Consider using {s} instead."))
            .unwrap_or_default();
        let mut diagnostic = Diagnostic::new(
            RuleId::NoDeprecatedWrapperFunctions,
            MessageId::DeprecatedFunction,
            ctx.tree.span(property),
            format!("{name} is deprecated and will be removed in VTU 2.{suggestion_text}"),
        )
        .with_data("identifier", name)
        .with_data("alternativeSuggestion", suggestion_text.clone());

        // `contains` is the only method with a mechanical rewrite:
        // `wrapper.contains(x)` becomes `wrapper.find(x).exists()`.
        if name == "contains" {
            diagnostic = diagnostic.with_fix(vec![
                replace_span(ctx.tree.span(property), "find"),
                insert_after(ctx.tree, node, ".exists()"),
            ]);
        }

        diagnostics.push(diagnostic);
    }
    Ok(())
}
