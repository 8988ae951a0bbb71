//! Lexical scopes and identifier bindings.
//!
//! The resolver walks from the innermost scope outward and returns the first
//! binding with a matching name. A missed lookup is a valid "no information
//! available" outcome, not an error.

use crate::ast::{NodeId, SyntaxTree};
use id_arena::{Arena, Id};
use std::collections::HashMap;

pub type ScopeId = Id<ScopeData>;

/// How a name was introduced into its scope.
#[derive(Debug, Clone)]
pub enum Definition {
    /// Bound by an `import` statement.
    Import(ImportDef),
    /// Bound by a declaration or parameter; carries no static value info.
    Variable,
}

/// The import statement a binding originates from.
#[derive(Debug, Clone)]
pub struct ImportDef {
    /// The module specifier string, e.g. `./MyComponent.vue`.
    pub source: String,
    /// The name as exported by the module. `None` for default and namespace
    /// imports.
    pub imported: Option<String>,
}

/// A resolved name: declaration site plus its definitions.
///
/// At most one import definition exists per binding.
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub defs: Vec<Definition>,
}

impl Binding {
    /// The binding's import definition, if it has one.
    pub fn import(&self) -> Option<&ImportDef> {
        self.defs.iter().find_map(|def| match def {
            Definition::Import(import) => Some(import),
            Definition::Variable => None,
        })
    }
}

/// One lexical scope: its bindings and a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct ScopeData {
    parent: Option<ScopeId>,
    bindings: Vec<Binding>,
}

/// All scopes of one file, attached to the nodes that introduce them
/// (the program root and each function).
#[derive(Debug)]
pub struct ScopeTree {
    arena: Arena<ScopeData>,
    root: ScopeId,
    by_node: HashMap<NodeId, ScopeId>,
}

impl ScopeTree {
    pub(crate) fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(ScopeData::default());
        Self {
            arena,
            root,
            by_node: HashMap::new(),
        }
    }

    pub fn root(&self) -> ScopeId {
        self.root
    }

    pub(crate) fn push(&mut self, parent: ScopeId) -> ScopeId {
        self.arena.alloc(ScopeData {
            parent: Some(parent),
            bindings: Vec::new(),
        })
    }

    pub(crate) fn attach(&mut self, node: NodeId, scope: ScopeId) {
        self.by_node.insert(node, scope);
    }

    pub(crate) fn declare(&mut self, scope: ScopeId, name: &str, def: Definition) {
        let bindings = &mut self.arena[scope].bindings;
        match bindings.iter_mut().find(|b| b.name == name) {
            Some(binding) => binding.defs.push(def),
            None => bindings.push(Binding {
                name: name.to_string(),
                defs: vec![def],
            }),
        }
    }

    /// The scope in effect at `node`: the one attached to the nearest
    /// enclosing scope-introducing ancestor (or the node itself).
    pub fn scope_at(&self, tree: &SyntaxTree, node: NodeId) -> ScopeId {
        if let Some(scope) = self.by_node.get(&node) {
            return *scope;
        }
        for ancestor in tree.ancestors(node) {
            if let Some(scope) = self.by_node.get(&ancestor) {
                return *scope;
            }
        }
        self.root
    }

    /// Resolve `name` starting at `scope`, walking outward. Returns `None`
    /// when no enclosing scope binds the name.
    pub fn resolve(&self, mut scope: ScopeId, name: &str) -> Option<&Binding> {
        loop {
            let data = &self.arena[scope];
            if let Some(binding) = data.bindings.iter().find(|b| b.name == name) {
                return Some(binding);
            }
            scope = data.parent?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_walks_outward_and_shadows() {
        let mut scopes = ScopeTree::new();
        let root = scopes.root();
        scopes.declare(
            root,
            "MyComponent",
            Definition::Import(ImportDef {
                source: "./MyComponent.vue".into(),
                imported: None,
            }),
        );
        let inner = scopes.push(root);
        scopes.declare(inner, "MyComponent", Definition::Variable);

        // Inner declaration shadows the import.
        let binding = scopes.resolve(inner, "MyComponent").unwrap();
        assert!(binding.import().is_none());

        // Outer lookup still sees the import.
        let binding = scopes.resolve(root, "MyComponent").unwrap();
        assert_eq!(
            binding.import().unwrap().source.as_str(),
            "./MyComponent.vue"
        );

        // Unknown names resolve to nothing.
        assert!(scopes.resolve(inner, "other").is_none());
    }

    #[test]
    fn import_definition_is_found_among_others() {
        let binding = Binding {
            name: "mount".into(),
            defs: vec![
                Definition::Variable,
                Definition::Import(ImportDef {
                    source: "@vue/test-utils".into(),
                    imported: Some("mount".into()),
                }),
            ],
        };
        assert_eq!(binding.import().unwrap().source.as_str(), "@vue/test-utils");
    }
}
