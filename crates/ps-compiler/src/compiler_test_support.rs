use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use ps_core::{
    Block, Directive, Expr, FunctionDecl, Game, Identifier, Member, ScriptDecl, Stmt, SyntaxTree,
    TranspileError, TypeRef, VariableDecl,
};

use crate::{CodeGenerator, DirectiveTable};

pub(crate) fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("paperscript-rs-{}-{}", name, nanos));
    fs::create_dir_all(&path).expect("temp dir should be created");
    path
}

pub(crate) fn script(members: Vec<Member>) -> ScriptDecl {
    ScriptDecl {
        name: Identifier::from("Main"),
        parent: Identifier::from("Quest"),
        flags: Vec::new(),
        members,
    }
}

pub(crate) fn tree_with(directives: Vec<Directive>, members: Vec<Member>) -> SyntaxTree {
    SyntaxTree {
        directives,
        script: script(members),
    }
}

pub(crate) fn generate_with(
    game: Game,
    directives: &DirectiveTable,
    members: Vec<Member>,
) -> Result<String, TranspileError> {
    CodeGenerator::for_game(game, directives).generate(&script(members))
}

pub(crate) fn generate_members(game: Game, members: Vec<Member>) -> Result<String, TranspileError> {
    generate_with(game, &DirectiveTable::new(), members)
}

/// Output lines after the `ScriptName` header and its blank line.
pub(crate) fn body_lines(output: &str) -> Vec<&str> {
    output.lines().skip(2).collect()
}

pub(crate) fn var(ty: &str, name: &str, init: Option<Expr>) -> VariableDecl {
    VariableDecl {
        ty: TypeRef::named(ty),
        name: Identifier::from(name),
        init,
        constant: false,
        conditional: false,
    }
}

pub(crate) fn function(name: &str, statements: Vec<Stmt>) -> FunctionDecl {
    FunctionDecl {
        return_type: None,
        name: Identifier::from(name),
        params: Vec::new(),
        modifiers: Vec::new(),
        body: Block::new(statements),
    }
}

pub(crate) fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr { expr }
}

/// Wraps statements in `Function Run()` and returns only the body lines.
pub(crate) fn run_body(game: Game, statements: Vec<Stmt>) -> Result<Vec<String>, TranspileError> {
    let output = generate_members(game, vec![Member::Function(function("Run", statements))])?;
    let lines = body_lines(&output);
    Ok(lines[1..lines.len() - 2]
        .iter()
        .map(|line| line.to_string())
        .collect())
}
