//! Disallows deprecated selector usage.
//!
//! Two independent checks: selector functions called with a component
//! selector, and component-only wrapper members read off the result of a
//! deprecated selector call.

use super::RuleContext;
use crate::ast::{NodeId, NodeKind};
use crate::classify::{
    is_component_selector, is_wrapper_rooted, member_callee, returns_wrapper,
};
use crate::diagnostic::{Diagnostic, MessageId, RuleId};
use crate::error::Result;
use crate::fixer::replace_span;
use crate::knowledge::{
    CHAINED_SELECTOR_FIX_SAFE_AT, COMPONENT_ONLY_WRAPPER_MEMBERS, DEPRECATED_SELECTOR_FUNCTIONS,
};
use crate::version::at_least;
use semver::Version;

pub(crate) fn run(ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) -> Result<()> {
    let version = ctx.require_version()?;
    for node in ctx.tree.preorder() {
        match ctx.tree.kind(node) {
            NodeKind::Call { .. } => check_selector_call(ctx, node, version, diagnostics),
            NodeKind::Member { .. } => check_member_usage(ctx, node, diagnostics),
            _ => {}
        }
    }
    Ok(())
}

/// `wrapper.find(MyComponent)` and friends: these functions should only ever
/// receive string selectors.
fn check_selector_call(
    ctx: &RuleContext<'_>,
    node: NodeId,
    version: &Version,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some((object, property, name)) = member_callee(ctx.tree, node) else {
        return;
    };
    let Some(&replacement) = DEPRECATED_SELECTOR_FUNCTIONS.get(name) else {
        return;
    };
    if !is_wrapper_rooted(ctx.tree, object, &ctx.options.wrapper_names) {
        return;
    }
    let NodeKind::Call { args, .. } = ctx.tree.kind(node) else {
        return;
    };
    let Some(&first_arg) = args.first() else {
        return;
    };
    if !is_component_selector(ctx.tree, ctx.scopes, first_arg, ctx.probe, ctx.resolve_base) {
        return;
    }

    // A chain like `get('div').get(SomeComponent)` cannot be autofixed before
    // 1.3: `get('div').getComponent(SomeComponent)` errors on those versions.
    let mut successive_chain = false;
    let mut link = object;
    while returns_wrapper(ctx.tree, link) {
        let Some((next, _, link_name)) = member_callee(ctx.tree, link) else {
            break;
        };
        if DEPRECATED_SELECTOR_FUNCTIONS.contains_key(link_name) {
            successive_chain = true;
            break;
        }
        link = next;
    }
    let fix_unsafe = successive_chain && !at_least(version, &CHAINED_SELECTOR_FIX_SAFE_AT);

    let mut diagnostic = Diagnostic::new(
        RuleId::NoDeprecatedSelectors,
        MessageId::DeprecatedComponentSelector,
        ctx.tree.span(first_arg),
        format!(
            "Calling {name} with a component selector is deprecated and will \
             be removed in VTU 2."
        ),
    )
    .with_data("functionName", name);

    if !fix_unsafe {
        diagnostic = diagnostic.with_fix(vec![replace_span(ctx.tree.span(property), replacement)]);
    }
    diagnostics.push(diagnostic);
}

/// `wrapper.find(...).vm` and friends: the deprecated selector will no longer
/// return a component wrapper, so the member disappears. The correct rewrite
/// requires re-deriving selector semantics, so no fix is offered.
fn check_member_usage(ctx: &RuleContext<'_>, node: NodeId, diagnostics: &mut Vec<Diagnostic>) {
    let NodeKind::Member {
        object,
        property,
        computed: false,
    } = ctx.tree.kind(node)
    else {
        return;
    };
    let Some(member_name) = ctx.tree.identifier_name(*property) else {
        return;
    };
    if !COMPONENT_ONLY_WRAPPER_MEMBERS.contains(&member_name) {
        return;
    }
    if !is_wrapper_rooted(ctx.tree, *object, &ctx.options.wrapper_names) {
        return;
    }
    // Member access rooted directly off the wrapper identifier is safe; only
    // access off a chain-returning call is suspect.
    if !returns_wrapper(ctx.tree, *object) {
        return;
    }

    let mut last_call = *object;
    // Special handling for `findAll().at(0).vm`: the selector to judge is the
    // `findAll`, not the `at`.
    if let Some((inner, _, "at")) = member_callee(ctx.tree, last_call) {
        if returns_wrapper(ctx.tree, inner) {
            last_call = inner;
        }
    }
    let Some((_, _, selector_name)) = member_callee(ctx.tree, last_call) else {
        return;
    };
    let Some(&alternate) = DEPRECATED_SELECTOR_FUNCTIONS.get(selector_name) else {
        return;
    };

    diagnostics.push(
        Diagnostic::new(
            RuleId::NoDeprecatedSelectors,
            MessageId::MemberUsageFromDeprecatedSelector,
            ctx.tree.span(node),
            format!(
                "{selector_name} will no longer return `wrapper.{member_name}` in \
                 VTU 2. Use {alternate} with a component selector instead."
            ),
        )
        .with_data("functionName", selector_name)
        .with_data("missingMemberName", member_name)
        .with_data("alternateFunctionName", alternate),
    );
}
