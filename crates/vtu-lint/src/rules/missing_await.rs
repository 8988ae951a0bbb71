//! Reports wrapper methods which update the underlying component but are
//! not awaited.

use super::RuleContext;
use crate::ast::{FunctionKind, NodeId, NodeKind};
use crate::classify::{emit_receiver, is_wrapper_rooted, member_callee};
use crate::diagnostic::{Diagnostic, MessageId, RuleId};
use crate::error::Result;
use crate::fixer::insert_before;
use crate::knowledge::UPDATE_TRIGGERING_FUNCTIONS;

pub(crate) fn run(ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) -> Result<()> {
    for node in ctx.tree.preorder() {
        if !matches!(ctx.tree.kind(node), NodeKind::Call { .. }) {
            continue;
        }
        let Some((object, _, name)) = member_callee(ctx.tree, node) else {
            continue;
        };

        let emit = emit_receiver(ctx.tree, node);
        let triggers_update = match emit {
            // `x.vm.$emit(...)` — re-check `x` against the wrapper chain.
            Some(receiver) => is_wrapper_rooted(ctx.tree, receiver, &ctx.options.wrapper_names),
            None => {
                UPDATE_TRIGGERING_FUNCTIONS.contains(&name)
                    && is_wrapper_rooted(ctx.tree, object, &ctx.options.wrapper_names)
            }
        };
        if !triggers_update {
            continue;
        }

        let awaited = ctx
            .tree
            .parent(node)
            .is_some_and(|parent| matches!(ctx.tree.kind(parent), NodeKind::Await { .. }));
        if awaited {
            continue;
        }

        let identifier = if emit.is_some() { "vm.$emit" } else { name };
        let mut diagnostic = Diagnostic::new(
            RuleId::MissingAwait,
            MessageId::MissingAwait,
            ctx.tree.span(node),
            format!(
                "wrapper.{identifier}() should be awaited to ensure resulting \
                 component updates are visible"
            ),
        )
        .with_data("identifier", identifier);

        let mut edits = vec![insert_before(ctx.tree, node, "await ")];
        if let Some(function) = containing_function(ctx, node) {
            if let NodeKind::Function { is_async: false, .. } = ctx.tree.kind(function) {
                edits.push(insert_before(ctx.tree, function, "async "));
            }
        }
        diagnostic = diagnostic.with_fix(edits);

        diagnostics.push(diagnostic);
    }
    Ok(())
}

/// The nearest enclosing arrow or function expression. Function declarations
/// are skipped, matching how the deprecated API's tests are written.
fn containing_function(ctx: &RuleContext<'_>, node: NodeId) -> Option<NodeId> {
    ctx.tree.ancestors(node).find(|&ancestor| {
        matches!(
            ctx.tree.kind(ancestor),
            NodeKind::Function {
                kind: FunctionKind::Arrow | FunctionKind::Expression,
                ..
            }
        )
    })
}
