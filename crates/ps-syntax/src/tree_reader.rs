use std::sync::OnceLock;

use ps_core::{
    Block, ConditionalBlock, Expr, Identifier, Member, Param, QualifiedName, Stmt, SyntaxTree,
    TypeRef, VariableDecl,
};
use regex::Regex;

use crate::listener::{ErrorListener, Position};

/// Reads a serialized tree. Malformed JSON yields `None`; identifier problems
/// are reported but the tree is still returned.
pub fn read_syntax_tree(source: &str, listener: &mut dyn ErrorListener) -> Option<SyntaxTree> {
    match serde_json::from_str::<SyntaxTree>(source) {
        Ok(tree) => {
            validate_identifiers(&tree, listener);
            Some(tree)
        }
        Err(error) => {
            let position = (error.line() > 0).then(|| Position {
                line: error.line(),
                column: error.column(),
            });
            listener.syntax_error(position, &error.to_string());
            None
        }
    }
}

pub fn validate_identifiers(tree: &SyntaxTree, listener: &mut dyn ErrorListener) {
    let mut checker = IdentifierChecker { listener };
    checker.identifier(&tree.script.name, "script name");
    checker.identifier(&tree.script.parent, "script parent");
    checker.members(&tree.script.members);
}

fn identifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$")
            .expect("identifier regex")
    })
}

struct IdentifierChecker<'a> {
    listener: &'a mut dyn ErrorListener,
}

impl IdentifierChecker<'_> {
    fn identifier(&mut self, identifier: &Identifier, context: &str) {
        if !identifier_regex().is_match(identifier.as_str()) {
            self.listener.syntax_error(
                None,
                &format!("invalid identifier \"{}\" in {}", identifier.as_str(), context),
            );
        }
    }

    fn qualified(&mut self, name: &QualifiedName, context: &str) {
        for segment in &name.segments {
            self.identifier(segment, context);
        }
    }

    fn type_ref(&mut self, ty: &TypeRef) {
        self.identifier(&ty.name, "type");
    }

    fn params(&mut self, params: &[Param]) {
        for param in params {
            self.type_ref(&param.ty);
            self.identifier(&param.name, "parameter");
            if let Some(default) = &param.default {
                self.expr(default);
            }
        }
    }

    fn variable(&mut self, declaration: &VariableDecl) {
        self.type_ref(&declaration.ty);
        self.identifier(&declaration.name, "variable");
        if let Some(init) = &declaration.init {
            self.expr(init);
        }
    }

    fn members(&mut self, members: &[Member]) {
        for member in members {
            match member {
                Member::Import(_) => {}
                Member::Variable(declaration) => self.variable(declaration),
                Member::InferredVariable(declaration) => {
                    self.identifier(&declaration.name, "variable");
                    if let Some(init) = &declaration.init {
                        self.expr(init);
                    }
                }
                Member::AutoProperty(property) => {
                    self.type_ref(&property.ty);
                    self.identifier(&property.name, "property");
                    if let Some(init) = &property.init {
                        self.expr(init);
                    }
                }
                Member::FullProperty(property) => {
                    self.type_ref(&property.ty);
                    self.identifier(&property.name, "property");
                    for accessor in [&property.getter, &property.setter].into_iter().flatten() {
                        self.block(accessor);
                    }
                }
                Member::Function(function) => {
                    if let Some(return_type) = &function.return_type {
                        self.type_ref(return_type);
                    }
                    self.identifier(&function.name, "function");
                    self.params(&function.params);
                    self.block(&function.body);
                }
                Member::Event(event) => {
                    self.identifier(&event.name, "event");
                    self.params(&event.params);
                    self.block(&event.body);
                }
                Member::State(state) => {
                    self.identifier(&state.name, "state");
                    self.members(&state.members);
                }
                Member::Struct(declaration) => {
                    self.identifier(&declaration.name, "struct");
                    for field in &declaration.members {
                        self.variable(field);
                    }
                }
                Member::Group(group) => {
                    self.identifier(&group.name, "group");
                    self.members(&group.members);
                }
                Member::Conditional(ConditionalBlock { body, .. }) => self.members(body),
            }
        }
    }

    fn block(&mut self, block: &Block) {
        for statement in &block.statements {
            self.stmt(statement);
        }
    }

    fn stmt(&mut self, statement: &Stmt) {
        match statement {
            Stmt::Expr { expr } => self.expr(expr),
            Stmt::Return { value } => {
                if let Some(value) = value {
                    self.expr(value);
                }
            }
            Stmt::Variable(declaration) => self.variable(declaration),
            Stmt::InferredVariable(declaration) => {
                self.identifier(&declaration.name, "variable");
                if let Some(init) = &declaration.init {
                    self.expr(init);
                }
            }
            Stmt::If(stmt) => {
                self.expr(&stmt.condition);
                self.block(&stmt.then_block);
                for branch in &stmt.else_ifs {
                    self.expr(&branch.condition);
                    self.block(&branch.block);
                }
                if let Some(block) = &stmt.else_block {
                    self.block(block);
                }
            }
            Stmt::While(stmt) => {
                self.expr(&stmt.condition);
                self.block(&stmt.body);
            }
            Stmt::Range(stmt) => {
                self.identifier(&stmt.element, "range element");
                self.identifier(&stmt.array, "range array");
                self.block(&stmt.body);
            }
            Stmt::Switch(stmt) => {
                self.expr(&stmt.subject);
                for case in &stmt.cases {
                    self.expr(&case.value);
                    self.block(&case.body);
                }
                if let Some(block) = &stmt.default {
                    self.block(block);
                }
            }
            Stmt::Conditional(ConditionalBlock { body, .. }) => {
                for statement in body {
                    self.stmt(statement);
                }
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { .. } | Expr::ArrayInit { .. } => {}
            Expr::Name { name } => self.qualified(name, "name"),
            Expr::Binary { lhs, rhs, .. } => {
                self.expr(lhs);
                self.expr(rhs);
            }
            Expr::Not { operand } | Expr::Negate { operand } => self.expr(operand),
            Expr::Paren { inner } => self.expr(inner),
            Expr::Assign { target, value, .. } => {
                self.expr(target);
                self.expr(value);
            }
            Expr::Call { callee, args } => {
                self.qualified(callee, "call");
                for arg in args {
                    self.expr(arg);
                }
            }
            Expr::Index { array, index } => {
                self.expr(array);
                self.expr(index);
            }
            Expr::NewArray { element_type, size } => {
                self.type_ref(element_type);
                self.expr(size);
            }
            Expr::NewStruct { struct_type } => self.type_ref(struct_type),
            Expr::StructInit { fields } => {
                for field in fields {
                    self.identifier(&field.name, "struct field");
                    self.expr(&field.value);
                }
            }
            Expr::Cast {
                operand,
                target_type,
            }
            | Expr::Is {
                operand,
                target_type,
            } => {
                self.expr(operand);
                self.type_ref(target_type);
            }
            Expr::Increment { target } | Expr::Decrement { target } => {
                self.qualified(target, "increment target")
            }
        }
    }
}

#[cfg(test)]
mod tree_reader_tests {
    use super::*;
    use crate::SyntaxErrorListener;

    const VALID_TREE: &str = r#"{
        "script": {
            "name": "MyMod::Main",
            "parent": "Quest",
            "members": [
                {
                    "kind": "function",
                    "name": "Tick",
                    "params": [{ "type": { "name": "Int" }, "name": "count" }],
                    "body": [
                        {
                            "kind": "range",
                            "element": "item",
                            "array": "items",
                            "body": [
                                { "kind": "expr", "expr": { "kind": "call", "callee": "Debug.Trace", "args": [] } }
                            ]
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn valid_tree_reads_without_diagnostics() {
        let mut listener = SyntaxErrorListener::new();
        let tree = read_syntax_tree(VALID_TREE, &mut listener).expect("tree should read");
        assert!(!listener.had_error(), "{:?}", listener.diagnostics());
        assert_eq!(tree.script.parent.as_str(), "Quest");
    }

    #[test]
    fn malformed_json_reports_position_and_returns_none() {
        let mut listener = SyntaxErrorListener::new();
        let tree = read_syntax_tree("{\n  \"script\": ", &mut listener);
        assert!(tree.is_none());
        assert!(listener.had_error());
        let diagnostic = &listener.diagnostics()[0];
        assert_eq!(diagnostic.position.map(|position| position.line), Some(2));
    }

    #[test]
    fn bad_identifiers_are_reported_but_tree_is_still_returned() {
        let source = VALID_TREE.replace("\"item\"", "\"9item\"");
        let mut listener = SyntaxErrorListener::new();
        let tree = read_syntax_tree(&source, &mut listener);
        assert!(tree.is_some());
        assert!(listener.had_error());
        assert!(listener.diagnostics()[0].message.contains("9item"));
    }
}
