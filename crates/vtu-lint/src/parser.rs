//! Front-end adapter: parses JavaScript with tree-sitter and lowers the
//! parse into the engine's closed-variant tree plus a scope table.
//!
//! The rule engine never sees tree-sitter types. Constructs the rules never
//! match on lower to [`NodeKind::Other`] with their children and spans
//! preserved, so chain peeling and ancestor walks work across them.

use crate::ast::{FunctionKind, Node, NodeId, NodeKind, PropertyKey, Span, SyntaxTree};
use crate::error::{Error, Result};
use crate::scope::{Definition, ImportDef, ScopeId, ScopeTree};
use id_arena::Arena;
use tree_sitter::{Node as TsNode, Parser};

/// A parsed file: syntax tree plus its scopes.
pub(crate) struct ParsedFile {
    pub tree: SyntaxTree,
    pub scopes: ScopeTree,
}

/// Parses `source` as a JavaScript module.
pub(crate) fn parse(source: &str) -> Result<ParsedFile> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .map_err(|e| Error::Parse(Some(e.to_string())))?;
    let ts_tree = parser
        .parse(source, None)
        .ok_or(Error::Parse(None))?;
    let root = ts_tree.root_node();
    if root.has_error() {
        return Err(Error::Parse(Some("syntax error".to_string())));
    }

    let mut lowerer = Lowerer {
        source,
        arena: Arena::new(),
        scopes: ScopeTree::new(),
        scope_stack: Vec::new(),
    };
    let root_scope = lowerer.scopes.root();
    lowerer.scope_stack.push(root_scope);

    let program = lowerer.lower_program(root);
    lowerer.scopes.attach(program, root_scope);

    Ok(ParsedFile {
        tree: SyntaxTree::new(lowerer.arena, program),
        scopes: lowerer.scopes,
    })
}

struct Lowerer<'a> {
    source: &'a str,
    arena: Arena<Node>,
    scopes: ScopeTree,
    scope_stack: Vec<ScopeId>,
}

impl<'a> Lowerer<'a> {
    fn text(&self, node: TsNode<'_>) -> &'a str {
        &self.source[node.byte_range()]
    }

    fn span(node: TsNode<'_>) -> Span {
        let range = node.byte_range();
        Span::new(range.start, range.end)
    }

    fn current_scope(&self) -> ScopeId {
        *self.scope_stack.last().expect("scope stack never empty")
    }

    /// Allocates a placeholder so children can point back at it.
    fn alloc(&mut self, span: Span) -> NodeId {
        self.arena.alloc(Node {
            kind: NodeKind::Other { children: vec![] },
            span,
            parent: None,
        })
    }

    /// Installs the final kind and wires the children's parent links.
    fn finish(&mut self, id: NodeId, kind: NodeKind) -> NodeId {
        for child in kind.children() {
            self.arena[child].parent = Some(id);
        }
        self.arena[id].kind = kind;
        id
    }

    fn named_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor).collect()
    }

    fn lower_program(&mut self, node: TsNode<'_>) -> NodeId {
        let id = self.alloc(Self::span(node));
        let body: Vec<NodeId> = Self::named_children(node)
            .into_iter()
            .map(|child| self.lower(child))
            .collect();
        self.finish(id, NodeKind::Program { body })
    }

    fn lower(&mut self, node: TsNode<'_>) -> NodeId {
        match node.kind() {
            "call_expression" => self.lower_call(node),
            "member_expression" => self.lower_member(node, false),
            "subscript_expression" => self.lower_member(node, true),
            "identifier" | "property_identifier" | "shorthand_property_identifier" => {
                let id = self.alloc(Self::span(node));
                let name = self.text(node).to_string();
                self.finish(id, NodeKind::Identifier(name))
            }
            "string" => {
                let id = self.alloc(Self::span(node));
                let text = self.text(node);
                let value = if text.len() >= 2 {
                    text[1..text.len() - 1].to_string()
                } else {
                    String::new()
                };
                self.finish(id, NodeKind::Str(value))
            }
            "number" | "true" | "false" | "null" | "undefined" | "regex"
            | "template_string" => {
                let id = self.alloc(Self::span(node));
                self.finish(id, NodeKind::Literal)
            }
            "object" => self.lower_object(node),
            "arrow_function" => self.lower_function(node, FunctionKind::Arrow),
            "function_expression" | "function" | "generator_function" => {
                self.lower_function(node, FunctionKind::Expression)
            }
            "function_declaration" | "generator_function_declaration" => {
                self.lower_function(node, FunctionKind::Declaration)
            }
            "await_expression" => {
                let id = self.alloc(Self::span(node));
                let argument = match node.named_child(0) {
                    Some(inner) => self.lower(inner),
                    None => return self.finish(id, NodeKind::Other { children: vec![] }),
                };
                self.finish(id, NodeKind::Await { argument })
            }
            // ESTree has no parenthesized-expression node; neither do we.
            "parenthesized_expression" => match node.named_child(0) {
                Some(inner) => self.lower(inner),
                None => {
                    let id = self.alloc(Self::span(node));
                    self.finish(id, NodeKind::Other { children: vec![] })
                }
            },
            "spread_element" => {
                let id = self.alloc(Self::span(node));
                let argument = match node.named_child(0) {
                    Some(inner) => self.lower(inner),
                    None => return self.finish(id, NodeKind::Other { children: vec![] }),
                };
                self.finish(id, NodeKind::Spread { argument })
            }
            "import_statement" => self.lower_import(node),
            "lexical_declaration" | "variable_declaration" => self.lower_declaration(node),
            _ => self.lower_other(node),
        }
    }

    fn lower_other(&mut self, node: TsNode<'_>) -> NodeId {
        let id = self.alloc(Self::span(node));
        let children: Vec<NodeId> = Self::named_children(node)
            .into_iter()
            .map(|child| self.lower(child))
            .collect();
        self.finish(id, NodeKind::Other { children })
    }

    fn lower_call(&mut self, node: TsNode<'_>) -> NodeId {
        let Some(function) = node.child_by_field_name("function") else {
            return self.lower_other(node);
        };
        let id = self.alloc(Self::span(node));
        let callee = self.lower(function);
        let args = match node.child_by_field_name("arguments") {
            Some(arguments) => Self::named_children(arguments)
                .into_iter()
                .map(|arg| self.lower(arg))
                .collect(),
            None => vec![],
        };
        self.finish(id, NodeKind::Call { callee, args })
    }

    fn lower_member(&mut self, node: TsNode<'_>, computed: bool) -> NodeId {
        let field = if computed { "index" } else { "property" };
        let (Some(object), Some(property)) = (
            node.child_by_field_name("object"),
            node.child_by_field_name(field),
        ) else {
            return self.lower_other(node);
        };
        let id = self.alloc(Self::span(node));
        let object = self.lower(object);
        let property = self.lower(property);
        self.finish(
            id,
            NodeKind::Member {
                object,
                property,
                computed,
            },
        )
    }

    fn lower_object(&mut self, node: TsNode<'_>) -> NodeId {
        let id = self.alloc(Self::span(node));
        let members: Vec<NodeId> = Self::named_children(node)
            .into_iter()
            .map(|member| match member.kind() {
                "pair" => self.lower_pair(member),
                "shorthand_property_identifier" => {
                    // `{ sync }` — key and value are the same identifier.
                    let pair = self.alloc(Self::span(member));
                    let value = self.lower(member);
                    let key = PropertyKey::Identifier {
                        name: self.text(member).to_string(),
                        span: Self::span(member),
                    };
                    self.finish(pair, NodeKind::Property { key, value })
                }
                _ => self.lower(member),
            })
            .collect();
        self.finish(id, NodeKind::Object { members })
    }

    fn lower_pair(&mut self, node: TsNode<'_>) -> NodeId {
        let (Some(key_node), Some(value_node)) = (
            node.child_by_field_name("key"),
            node.child_by_field_name("value"),
        ) else {
            return self.lower_other(node);
        };
        let id = self.alloc(Self::span(node));
        let key = match key_node.kind() {
            "property_identifier" => PropertyKey::Identifier {
                name: self.text(key_node).to_string(),
                span: Self::span(key_node),
            },
            "string" => {
                let text = self.text(key_node);
                let value = if text.len() >= 2 {
                    text[1..text.len() - 1].to_string()
                } else {
                    String::new()
                };
                PropertyKey::Literal {
                    value,
                    span: Self::span(key_node),
                }
            }
            "number" => PropertyKey::Literal {
                value: self.text(key_node).to_string(),
                span: Self::span(key_node),
            },
            _ => PropertyKey::Computed,
        };
        let value = self.lower(value_node);
        self.finish(id, NodeKind::Property { key, value })
    }

    fn lower_function(&mut self, node: TsNode<'_>, kind: FunctionKind) -> NodeId {
        let is_async = node.child(0).is_some_and(|c| c.kind() == "async");

        // A declaration's name binds in the enclosing scope.
        if kind == FunctionKind::Declaration {
            if let Some(name) = node.child_by_field_name("name") {
                let name = self.text(name).to_string();
                self.scopes
                    .declare(self.current_scope(), &name, Definition::Variable);
            }
        }

        let id = self.alloc(Self::span(node));
        let scope = self.scopes.push(self.current_scope());
        self.scopes.attach(id, scope);
        self.scope_stack.push(scope);

        let mut params = Vec::new();
        if let Some(parameters) = node.child_by_field_name("parameters") {
            for param in Self::named_children(parameters) {
                self.declare_params(param);
                params.push(self.lower(param));
            }
        } else if let Some(param) = node.child_by_field_name("parameter") {
            // Single-identifier arrow parameter, `x => ...`.
            self.declare_params(param);
            params.push(self.lower(param));
        }

        let body = match node.child_by_field_name("body") {
            Some(body) => self.lower(body),
            None => {
                let empty = self.alloc(Self::span(node));
                self.finish(empty, NodeKind::Other { children: vec![] })
            }
        };

        self.scope_stack.pop();
        self.finish(
            id,
            NodeKind::Function {
                kind,
                is_async,
                params,
                body,
            },
        )
    }

    /// Declares the identifiers bound by a parameter node. Destructuring
    /// patterns are walked for their identifiers; defaults are ignored.
    fn declare_params(&mut self, node: TsNode<'_>) {
        match node.kind() {
            "identifier" => {
                let name = self.text(node).to_string();
                self.scopes
                    .declare(self.current_scope(), &name, Definition::Variable);
            }
            "assignment_pattern" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.declare_params(left);
                }
            }
            "object_pattern" | "array_pattern" | "rest_pattern" | "pair_pattern"
            | "shorthand_property_identifier_pattern" => {
                for child in Self::named_children(node) {
                    self.declare_params(child);
                }
            }
            _ => {}
        }
    }

    fn lower_import(&mut self, node: TsNode<'_>) -> NodeId {
        let source = node
            .child_by_field_name("source")
            .map(|s| self.text(s))
            .map(|text| {
                if text.len() >= 2 {
                    text[1..text.len() - 1].to_string()
                } else {
                    String::new()
                }
            });

        if let Some(source) = source {
            let scope = self.current_scope();
            for clause in Self::named_children(node) {
                if clause.kind() != "import_clause" {
                    continue;
                }
                for binding in Self::named_children(clause) {
                    match binding.kind() {
                        // default import
                        "identifier" => {
                            let local = self.text(binding).to_string();
                            self.scopes.declare(
                                scope,
                                &local,
                                Definition::Import(ImportDef {
                                    source: source.clone(),
                                    imported: None,
                                }),
                            );
                        }
                        "namespace_import" => {
                            if let Some(local) = Self::named_children(binding)
                                .into_iter()
                                .find(|c| c.kind() == "identifier")
                            {
                                let local = self.text(local).to_string();
                                self.scopes.declare(
                                    scope,
                                    &local,
                                    Definition::Import(ImportDef {
                                        source: source.clone(),
                                        imported: None,
                                    }),
                                );
                            }
                        }
                        "named_imports" => {
                            for specifier in Self::named_children(binding) {
                                if specifier.kind() != "import_specifier" {
                                    continue;
                                }
                                let Some(name) = specifier.child_by_field_name("name") else {
                                    continue;
                                };
                                let imported = self.text(name).to_string();
                                let local = specifier
                                    .child_by_field_name("alias")
                                    .map(|alias| self.text(alias).to_string())
                                    .unwrap_or_else(|| imported.clone());
                                self.scopes.declare(
                                    scope,
                                    &local,
                                    Definition::Import(ImportDef {
                                        source: source.clone(),
                                        imported: Some(imported),
                                    }),
                                );
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        // The statement itself carries no children the rules look at.
        let id = self.alloc(Self::span(node));
        self.finish(id, NodeKind::Other { children: vec![] })
    }

    fn lower_declaration(&mut self, node: TsNode<'_>) -> NodeId {
        let id = self.alloc(Self::span(node));
        let mut children = Vec::new();
        for declarator in Self::named_children(node) {
            if declarator.kind() == "variable_declarator" {
                if let Some(name) = declarator.child_by_field_name("name") {
                    if name.kind() == "identifier" {
                        let name = self.text(name).to_string();
                        self.scopes
                            .declare(self.current_scope(), &name, Definition::Variable);
                    }
                }
            }
            children.push(self.lower_other(declarator));
        }
        self.finish(id, NodeKind::Other { children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    fn parse_ok(source: &str) -> ParsedFile {
        parse(source).expect("source should parse")
    }

    fn find_call(file: &ParsedFile) -> NodeId {
        file.tree
            .preorder()
            .into_iter()
            .find(|&id| matches!(file.tree.kind(id), NodeKind::Call { .. }))
            .expect("expected a call node")
    }

    #[test]
    fn lowers_member_call_chain() {
        let file = parse_ok("wrapper.get('div').trigger('click')");
        let call = find_call(&file);
        let NodeKind::Call { callee, args } = file.tree.kind(call) else {
            unreachable!()
        };
        assert_eq!(args.len(), 1);
        let NodeKind::Member { property, computed, .. } = file.tree.kind(*callee) else {
            panic!("callee should be a member access");
        };
        assert!(!computed);
        assert_eq!(file.tree.identifier_name(*property), Some("trigger"));
    }

    #[test]
    fn subscript_access_is_computed() {
        let file = parse_ok("foo['bar']()");
        let call = find_call(&file);
        let NodeKind::Call { callee, .. } = file.tree.kind(call) else {
            unreachable!()
        };
        assert!(matches!(
            file.tree.kind(*callee),
            NodeKind::Member { computed: true, .. }
        ));
    }

    #[test]
    fn import_bindings_land_in_module_scope() {
        let file = parse_ok(
            "import MyComponent from './MyComponent.vue';\n\
             import { mount as doMount } from '@vue/test-utils';",
        );
        let root = file.scopes.root();

        let binding = file.scopes.resolve(root, "MyComponent").unwrap();
        let import = binding.import().unwrap();
        assert_eq!(import.source, "./MyComponent.vue");
        assert!(import.imported.is_none());

        let binding = file.scopes.resolve(root, "doMount").unwrap();
        let import = binding.import().unwrap();
        assert_eq!(import.source, "@vue/test-utils");
        assert_eq!(import.imported.as_deref(), Some("mount"));
    }

    #[test]
    fn arrow_async_flag_and_scope() {
        let file = parse_ok("async (x) => wrapper.trigger(x)");
        let func = file
            .tree
            .preorder()
            .into_iter()
            .find(|&id| matches!(file.tree.kind(id), NodeKind::Function { .. }))
            .unwrap();
        let NodeKind::Function { is_async, kind, .. } = file.tree.kind(func) else {
            unreachable!()
        };
        assert!(*is_async);
        assert_eq!(*kind, FunctionKind::Arrow);

        // The parameter resolves inside the function scope.
        let call = find_call(&file);
        let scope = file.scopes.scope_at(&file.tree, call);
        assert!(file.scopes.resolve(scope, "x").is_some());
        assert!(file.scopes.resolve(scope, "y").is_none());
    }

    #[test]
    fn const_binding_is_not_an_import() {
        let file = parse_ok("const button = 'button'; wrapper.get(button);");
        let root = file.scopes.root();
        let binding = file.scopes.resolve(root, "button").unwrap();
        assert!(binding.import().is_none());
    }

    #[test]
    fn object_properties_expose_static_keys() {
        let file = parse_ok("mount(Foo, { sync: true, 'propsData': {}, [k]: 1, ...rest })");
        let object = file
            .tree
            .preorder()
            .into_iter()
            .find(|&id| matches!(file.tree.kind(id), NodeKind::Object { .. }))
            .unwrap();
        let NodeKind::Object { members } = file.tree.kind(object) else {
            unreachable!()
        };
        let keys: Vec<Option<String>> = members
            .iter()
            .filter_map(|&m| match file.tree.kind(m) {
                NodeKind::Property { key, .. } => Some(key.name().map(str::to_string)),
                _ => None,
            })
            .collect();
        assert_eq!(
            keys,
            vec![
                Some("sync".to_string()),
                Some("propsData".to_string()),
                None
            ]
        );
        assert!(members
            .iter()
            .any(|&m| matches!(file.tree.kind(m), NodeKind::Spread { .. })));
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(parse("wrapper.get(").is_err());
    }
}
