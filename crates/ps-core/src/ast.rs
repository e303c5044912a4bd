//! Syntax tree handed over by the front-end parser.
//!
//! The tree is read-only for the code generator. It round-trips through serde
//! so the external parser can hand it over as JSON; enums are tagged with
//! `kind` the same way across declarations, statements and expressions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw identifier text as written in the source, `::` namespace separators included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Target-language spelling: every `::` becomes a single `:`.
    pub fn normalized(&self) -> String {
        self.0.replace("::", ":")
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}

/// Dotted name such as `Game.GetPlayer` or `self.Count`. Serialized as the dotted string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QualifiedName {
    pub segments: Vec<Identifier>,
}

impl QualifiedName {
    pub fn new(segments: Vec<Identifier>) -> Self {
        Self { segments }
    }

    pub fn normalized(&self) -> String {
        self.segments
            .iter()
            .map(Identifier::normalized)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::new(value.split('.').map(Identifier::from).collect())
    }
}

impl From<String> for QualifiedName {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<QualifiedName> for String {
    fn from(value: QualifiedName) -> Self {
        value
            .segments
            .iter()
            .map(Identifier::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: Identifier,
    #[serde(default)]
    pub array: bool,
}

impl TypeRef {
    pub fn named(name: &str) -> Self {
        Self {
            name: Identifier::from(name),
            array: false,
        }
    }

    pub fn array_of(name: &str) -> Self {
        Self {
            name: Identifier::from(name),
            array: true,
        }
    }

    pub fn is_void(&self) -> bool {
        !self.array && self.name.as_str().eq_ignore_ascii_case("void")
    }

    pub fn element(&self) -> Self {
        Self {
            name: self.name.clone(),
            array: false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name.normalized())?;
        if self.array {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxTree {
    #[serde(default)]
    pub directives: Vec<Directive>,
    pub script: ScriptDecl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Directive {
    Define {
        name: String,
        #[serde(default)]
        value: Option<String>,
    },
    Include {
        path: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptDecl {
    pub name: Identifier,
    pub parent: Identifier,
    #[serde(default)]
    pub flags: Vec<ScriptFlag>,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptFlag {
    Hidden,
    Conditional,
    Beta,
    Debug,
    Const,
    Native,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Member {
    Import(ImportDecl),
    Variable(VariableDecl),
    InferredVariable(InferredVariableDecl),
    AutoProperty(AutoProperty),
    FullProperty(FullProperty),
    Function(FunctionDecl),
    Event(EventDecl),
    State(StateDecl),
    Struct(StructDecl),
    Group(GroupDecl),
    Conditional(ConditionalBlock<Member>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub path: String,
}

/// `#if NAME ... #endif`. Body is kept only when the directive is exactly `"true"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ConditionalBlock<T> {
    pub name: String,
    #[serde(default)]
    pub body: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub name: Identifier,
    #[serde(default)]
    pub init: Option<Expr>,
    #[serde(default, rename = "const")]
    pub constant: bool,
    #[serde(default)]
    pub conditional: bool,
}

/// `var name = ...`, extended game only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredVariableDecl {
    pub name: Identifier,
    #[serde(default)]
    pub init: Option<Expr>,
    #[serde(default, rename = "const")]
    pub constant: bool,
    #[serde(default)]
    pub conditional: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyModifier {
    ReadOnly,
    Conditional,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoProperty {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub name: Identifier,
    #[serde(default)]
    pub init: Option<Expr>,
    #[serde(default)]
    pub modifier: Option<PropertyModifier>,
    #[serde(default, rename = "const")]
    pub constant: bool,
    #[serde(default)]
    pub mandatory: bool,
}

/// Property with explicit accessors. The accessors receive `ty` from here
/// when generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullProperty {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub name: Identifier,
    #[serde(default)]
    pub getter: Option<Block>,
    #[serde(default)]
    pub setter: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub name: Identifier,
    #[serde(default)]
    pub default: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionModifier {
    Native,
    Global,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    pub name: Identifier,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub modifiers: Vec<FunctionModifier>,
    #[serde(default)]
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDecl {
    pub name: Identifier,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDecl {
    pub name: Identifier,
    #[serde(default)]
    pub auto: bool,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDecl {
    pub name: Identifier,
    #[serde(default)]
    pub members: Vec<VariableDecl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupFlag {
    Collapsed,
    CollapsedOnRef,
    CollapsedOnBase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDecl {
    pub name: Identifier,
    #[serde(default)]
    pub flags: Vec<GroupFlag>,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Stmt {
    Expr {
        expr: Expr,
    },
    Return {
        #[serde(default)]
        value: Option<Expr>,
    },
    Variable(VariableDecl),
    InferredVariable(InferredVariableDecl),
    If(IfStmt),
    While(WhileStmt),
    Range(RangeStmt),
    Switch(SwitchStmt),
    Conditional(ConditionalBlock<Stmt>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Block,
    #[serde(default)]
    pub else_ifs: Vec<ElseIf>,
    #[serde(default)]
    pub else_block: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElseIf {
    pub condition: Expr,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
}

/// `for element in array { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeStmt {
    pub element: Identifier,
    pub array: Identifier,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStmt {
    pub subject: Expr,
    #[serde(default)]
    pub cases: Vec<SwitchCase>,
    #[serde(default)]
    pub default: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub value: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Literal {
    Int(String),
    Float(String),
    Bool(bool),
    String(String),
    None,
}

impl Literal {
    /// Element type used when an array literal has no declared type to borrow.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            Self::Int(_) => Some("Int"),
            Self::Float(_) => Some("Float"),
            Self::Bool(_) => Some("Bool"),
            Self::String(_) => Some("String"),
            Self::None => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(text) | Self::Float(text) => f.write_str(text),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::String(text) => write!(f, "\"{}\"", text),
            Self::None => f.write_str("None"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInit {
    pub name: Identifier,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Expr {
    Literal {
        value: Literal,
    },
    Name {
        name: QualifiedName,
    },
    Binary {
        lhs: Box<Expr>,
        op: String,
        rhs: Box<Expr>,
    },
    Not {
        operand: Box<Expr>,
    },
    Negate {
        operand: Box<Expr>,
    },
    Paren {
        inner: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        op: String,
        value: Box<Expr>,
    },
    Call {
        callee: QualifiedName,
        #[serde(default)]
        args: Vec<Expr>,
    },
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    NewArray {
        element_type: TypeRef,
        size: Box<Expr>,
    },
    NewStruct {
        struct_type: TypeRef,
    },
    ArrayInit {
        #[serde(default)]
        elements: Vec<Literal>,
    },
    StructInit {
        #[serde(default)]
        fields: Vec<FieldInit>,
    },
    Cast {
        operand: Box<Expr>,
        target_type: TypeRef,
    },
    Is {
        operand: Box<Expr>,
        target_type: TypeRef,
    },
    Increment {
        target: QualifiedName,
    },
    Decrement {
        target: QualifiedName,
    },
}

impl Expr {
    pub fn int(text: &str) -> Self {
        Self::Literal {
            value: Literal::Int(text.to_string()),
        }
    }

    pub fn name(text: &str) -> Self {
        Self::Name {
            name: QualifiedName::from(text),
        }
    }

    pub fn binary(lhs: Expr, op: &str, rhs: Expr) -> Self {
        Self::Binary {
            lhs: Box::new(lhs),
            op: op.to_string(),
            rhs: Box::new(rhs),
        }
    }

    pub fn call(callee: &str, args: Vec<Expr>) -> Self {
        Self::Call {
            callee: QualifiedName::from(callee),
            args,
        }
    }
}

#[cfg(test)]
mod ast_tests {
    use super::*;

    #[test]
    fn identifiers_collapse_namespace_separators() {
        assert_eq!(Identifier::from("MyMod::Quest").normalized(), "MyMod:Quest");
        assert_eq!(Identifier::from("a::b::c").normalized(), "a:b:c");
        assert_eq!(Identifier::from("plain").normalized(), "plain");
        assert_eq!(
            QualifiedName::from("MyMod::Utils.Lib::Helper.Run").normalized(),
            "MyMod:Utils.Lib:Helper.Run"
        );
    }

    #[test]
    fn type_refs_render_arrays_and_detect_void() {
        assert_eq!(TypeRef::array_of("Int").to_string(), "Int[]");
        assert_eq!(TypeRef::named("NS::Point").to_string(), "NS:Point");
        assert!(TypeRef::named("Void").is_void());
        assert!(!TypeRef::array_of("void").is_void());
    }

    #[test]
    fn literals_render_target_spelling() {
        assert_eq!(Literal::Int("0x1F".to_string()).to_string(), "0x1F");
        assert_eq!(Literal::Bool(true).to_string(), "True");
        assert_eq!(Literal::String("hi".to_string()).to_string(), "\"hi\"");
        assert_eq!(Literal::None.to_string(), "None");
        assert_eq!(Literal::None.type_name(), None);
    }

    #[test]
    fn tree_deserializes_from_tagged_json() {
        let json = r#"{
            "directives": [{ "kind": "define", "name": "DEBUG" }],
            "script": {
                "name": "MyMod::Main",
                "parent": "Quest",
                "members": [
                    {
                        "kind": "variable",
                        "type": { "name": "Int" },
                        "name": "count",
                        "init": { "kind": "literal", "value": { "type": "int", "value": "5" } }
                    },
                    {
                        "kind": "function",
                        "name": "Run",
                        "body": [
                            { "kind": "expr", "expr": { "kind": "increment", "target": "count" } }
                        ]
                    }
                ]
            }
        }"#;
        let tree: SyntaxTree = serde_json::from_str(json).expect("tree should deserialize");
        assert_eq!(
            tree.directives,
            vec![Directive::Define {
                name: "DEBUG".to_string(),
                value: None
            }]
        );
        assert_eq!(tree.script.name.normalized(), "MyMod:Main");
        assert_eq!(tree.script.members.len(), 2);
        let Member::Function(function) = &tree.script.members[1] else {
            panic!("expected function member");
        };
        assert!(function.return_type.is_none());
        assert_eq!(function.body.statements.len(), 1);
    }
    #[test]
    fn conditional_member_without_body_deserializes_empty() {
        let json = r#"{ "kind": "conditional", "name": "DEBUG" }"#;
        let member: Member = serde_json::from_str(json).expect("conditional should deserialize");
        let Member::Conditional(block) = member else {
            panic!("expected conditional member");
        };
        assert_eq!(block.name, "DEBUG");
        assert!(block.body.is_empty());
    }
}
