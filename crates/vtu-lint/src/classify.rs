//! The pattern-matching core: wrapper-chain and component-selector
//! classification.
//!
//! Everything here answers yes/no questions about nodes. Malformed or
//! ambiguous shapes (computed properties, unresolvable identifiers) classify
//! as "no", never as errors.

use crate::ast::{NodeId, NodeKind, SyntaxTree};
use crate::knowledge::{VTU_MODULE, WRAPPER_RETURNING_FUNCTIONS};
use crate::probe::{ExportKind, ModuleProbe, ProbeOutcome};
use crate::scope::ScopeTree;
use std::path::Path;
use tracing::debug;

/// The callee of a call expression, when it is a plain (non-computed) member
/// access with an identifier property: `(object, property_node, name)`.
pub(crate) fn member_callee<'a>(
    tree: &'a SyntaxTree,
    call: NodeId,
) -> Option<(NodeId, NodeId, &'a str)> {
    let NodeKind::Call { callee, .. } = tree.kind(call) else {
        return None;
    };
    let NodeKind::Member {
        object,
        property,
        computed: false,
    } = tree.kind(*callee)
    else {
        return None;
    };
    let name = tree.identifier_name(*property)?;
    Some((*object, *property, name))
}

/// True if the node is a call whose callee accesses one of the
/// chain-returning accessor names: calling it on a wrapper-like value yields
/// another wrapper-like value.
pub(crate) fn returns_wrapper(tree: &SyntaxTree, node: NodeId) -> bool {
    member_callee(tree, node)
        .is_some_and(|(_, _, name)| WRAPPER_RETURNING_FUNCTIONS.contains(&name))
}

/// Peels chain-returning calls off `node` one link at a time, returning the
/// residual expression the chain is rooted at. Terminates because each step
/// descends into a strictly smaller subtree; a zero-length chain returns the
/// node unchanged.
pub(crate) fn peel_wrapper_chain(tree: &SyntaxTree, mut node: NodeId) -> NodeId {
    while let Some((object, _, name)) = member_callee(tree, node) {
        if !WRAPPER_RETURNING_FUNCTIONS.contains(&name) {
            break;
        }
        node = object;
    }
    node
}

/// True if the expression is (transitively, through chain-returning calls)
/// rooted at an identifier named in `wrapper_names`.
///
/// `wrapper.get('div').contains()` is rooted at `wrapper`; `'1234'.split()`
/// and `[1, 2, 3].contains()` are not rooted at anything wrapper-like.
pub(crate) fn is_wrapper_rooted(tree: &SyntaxTree, node: NodeId, wrapper_names: &[String]) -> bool {
    let root = peel_wrapper_chain(tree, node);
    tree.identifier_name(root)
        .is_some_and(|name| wrapper_names.iter().any(|w| w == name))
}

/// True if the call triggers a custom component emit:
/// `x.vm.$emit(...)`. The caller re-checks `x` (see [`emit_receiver`])
/// against the wrapper chain.
pub(crate) fn is_emit_call(tree: &SyntaxTree, call: NodeId) -> bool {
    emit_receiver(tree, call).is_some()
}

/// The `x` in `x.vm.$emit(...)`, when the call has that exact shape.
pub(crate) fn emit_receiver(tree: &SyntaxTree, call: NodeId) -> Option<NodeId> {
    let (object, _, name) = member_callee(tree, call)?;
    if name != "$emit" {
        return None;
    }
    let NodeKind::Member {
        object: receiver,
        property,
        computed: false,
    } = tree.kind(object)
    else {
        return None;
    };
    if tree.identifier_name(*property)? != "vm" {
        return None;
    }
    Some(*receiver)
}

/// True if the argument statically denotes a UI component reference rather
/// than a CSS/string selector.
///
/// Object literals always match (structural component descriptors). An
/// identifier matches when it resolves to an import of a `.vue` source file,
/// or when probing the imported module shows an object- or function-valued
/// export. When the module resolves but cannot be loaded, a best-effort
/// heuristic decides: resolved under `node_modules` and specifier mentions
/// `vue`. The heuristic can both under- and over-classify; it is a fallback,
/// not a guarantee.
pub(crate) fn is_component_selector(
    tree: &SyntaxTree,
    scopes: &ScopeTree,
    node: NodeId,
    probe: &dyn ModuleProbe,
    base_file: &Path,
) -> bool {
    if matches!(tree.kind(node), NodeKind::Object { .. }) {
        return true;
    }
    let Some(name) = tree.identifier_name(node) else {
        return false;
    };
    let scope = scopes.scope_at(tree, node);
    let Some(binding) = scopes.resolve(scope, name) else {
        return false;
    };
    // Non-imports cannot be statically classified; deliberately conservative.
    let Some(import) = binding.import() else {
        return false;
    };

    // Short circuit on the single-file-component convention to avoid costly
    // module resolution attempts.
    if import.source.ends_with(".vue") {
        return true;
    }

    match probe.probe(&import.source, base_file) {
        ProbeOutcome::Shape(shape) => matches!(
            shape.export(import.imported.as_deref()),
            Some(ExportKind::Object | ExportKind::Function)
        ),
        ProbeOutcome::Unloadable { resolved_path } => {
            let heuristic = resolved_path.to_string_lossy().contains("node_modules")
                && import.source.contains("vue");
            debug!(
                specifier = %import.source,
                resolved = %resolved_path.display(),
                heuristic,
                "Module not loadable, using vendored-path heuristic"
            );
            heuristic
        }
        ProbeOutcome::Unresolved => false,
    }
}

/// True if the identifier resolves to an import from `@vue/test-utils`.
/// Rejects same-named functions imported from unrelated modules.
pub(crate) fn is_vtu_import(tree: &SyntaxTree, scopes: &ScopeTree, ident: NodeId) -> bool {
    let Some(name) = tree.identifier_name(ident) else {
        return false;
    };
    let scope = scopes.scope_at(tree, ident);
    scopes
        .resolve(scope, name)
        .and_then(|binding| binding.import())
        .is_some_and(|import| import.source == VTU_MODULE)
}
