//! Disallows deprecated mount options.
//!
//! Only inspects calls verified to originate from the `@vue/test-utils`
//! import; same-named functions from unrelated modules are left alone. The
//! valid-option whitelist is version-dependent.

use super::RuleContext;
use crate::ast::{NodeKind, PropertyKey};
use crate::classify::is_vtu_import;
use crate::diagnostic::{Diagnostic, MessageId, RuleId};
use crate::error::Result;
use crate::fixer::{delete_property, replace_span};
use crate::knowledge::{
    MountOptionFix, MOUNT_FUNCTION_NAMES, NEXT_MAJOR, REMOVED_MOUNT_OPTIONS, SYNC_REMOVED_AT,
    VALID_MOUNT_OPTIONS_V1, VALID_MOUNT_OPTIONS_V2,
};
use crate::version::at_least;

pub(crate) fn run(ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) -> Result<()> {
    let version = ctx.require_version()?;
    let valid_options = if at_least(version, &NEXT_MAJOR) {
        &*VALID_MOUNT_OPTIONS_V2
    } else {
        &*VALID_MOUNT_OPTIONS_V1
    };
    let is_ignored = |name: &str| {
        ctx.options
            .ignore_mount_options
            .iter()
            .any(|ignored| ignored == name)
    };
    let sync_removed = at_least(version, &SYNC_REMOVED_AT);

    for node in ctx.tree.preorder() {
        let NodeKind::Call { callee, args } = ctx.tree.kind(node) else {
            continue;
        };
        let callee = *callee;
        let Some(callee_name) = ctx.tree.identifier_name(callee) else {
            continue;
        };
        if !MOUNT_FUNCTION_NAMES.contains(&callee_name) {
            continue;
        }
        if !is_vtu_import(ctx.tree, ctx.scopes, callee) {
            continue;
        }

        let Some(&options_arg) = args.get(1) else {
            continue;
        };
        let NodeKind::Object { members } = ctx.tree.kind(options_arg) else {
            // second argument is not an object literal
            continue;
        };

        for &member in members {
            // spreads and computed/non-literal keys cannot be classified
            let NodeKind::Property { key, value } = ctx.tree.kind(member) else {
                continue;
            };
            let Some(key_name) = key.name() else {
                continue;
            };
            let property_span = ctx.tree.span(member);

            if key_name == "sync" && sync_removed {
                diagnostics.push(
                    Diagnostic::new(
                        RuleId::NoDeprecatedMountOptions,
                        MessageId::SyncIsRemoved,
                        property_span,
                        "The mount option `sync` was removed in VTU 1.0.0-beta.30 \
                         and has no effect."
                            .to_string(),
                    )
                    .with_fix(vec![delete_property(ctx.source, property_span)]),
                );
            } else if !valid_options.contains(key_name) && !is_ignored(key_name) {
                let entry = REMOVED_MOUNT_OPTIONS.get(key_name);
                let replacement_text = entry
                    .and_then(|e| e.replacement)
                    .map(|r| format!(" Use '{r}' instead."))
                    .unwrap_or_default();

                let (message_id, message) = match entry {
                    Some(_) => (
                        MessageId::DeprecatedMountOption,
                        format!(
                            "The mount option `{key_name}` is deprecated and will be \
                             removed in VTU 2.{replacement_text}"
                        ),
                    ),
                    None => (
                        MessageId::UnknownMountOption,
                        format!(
                            "The mount option `{key_name}` is relying on component \
                             option merging and will have no effect in VTU 2."
                        ),
                    ),
                };

                let mut diagnostic = Diagnostic::new(
                    RuleId::NoDeprecatedMountOptions,
                    message_id,
                    property_span,
                    message,
                )
                .with_data("mountOption", key_name)
                .with_data("replacementOption", replacement_text.clone());

                if let Some(MountOptionFix::AttachToDocument) = entry.and_then(|e| e.fix) {
                    if let PropertyKey::Identifier { span, .. }
                    | PropertyKey::Literal { span, .. } = key
                    {
                        diagnostic = diagnostic.with_fix(vec![
                            replace_span(*span, "attachTo"),
                            replace_span(ctx.tree.span(*value), "document.body"),
                        ]);
                    }
                }

                diagnostics.push(diagnostic);
            }
        }
    }
    Ok(())
}
