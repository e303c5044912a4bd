use std::path::PathBuf;

use indexmap::IndexMap;
use ps_core::{Game, SyntaxTree, TranspileError};
use serde::Serialize;

use crate::directives::{preprocess, DirectiveTable};
use crate::generator::CodeGenerator;
use crate::substitute::substitute_directives;

#[derive(Debug, Clone)]
pub struct TranspileOptions {
    /// Engine name as given by the caller; validated before anything else runs.
    pub game: String,
    /// Base directory for relative include paths.
    pub include_root: PathBuf,
    /// Defines seeded ahead of the file's own directives.
    pub defines: IndexMap<String, String>,
}

impl TranspileOptions {
    pub fn new(game: impl Into<String>) -> Self {
        Self {
            game: game.into(),
            include_root: PathBuf::from("."),
            defines: IndexMap::new(),
        }
    }

    pub fn with_include_root(mut self, include_root: impl Into<PathBuf>) -> Self {
        self.include_root = include_root.into();
        self
    }

    pub fn with_defines(mut self, defines: IndexMap<String, String>) -> Self {
        self.defines = defines;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranspileResult {
    pub code: String,
    pub directives: DirectiveTable,
}

impl TranspileResult {
    /// Value of the `OutputFileName` directive, if the script set one.
    pub fn output_file_name(&self) -> Option<&str> {
        self.directives.get("OutputFileName")
    }
}

/// Runs directive collection, generation and substitution for one tree.
///
/// The tree is trusted: callers that obtained it from a front-end must check
/// its error listener first.
pub fn transpile(
    tree: &SyntaxTree,
    options: &TranspileOptions,
) -> Result<TranspileResult, TranspileError> {
    let game: Game = options.game.parse()?;
    let preprocessed = preprocess(&tree.directives, &options.defines, &options.include_root)?;
    let directives = preprocessed.directives;

    let generated = CodeGenerator::for_game(game, &directives).generate(&tree.script)?;

    let mut raw = String::new();
    for include in &preprocessed.includes {
        raw.push_str(include);
        if !include.ends_with('\n') {
            raw.push('\n');
        }
    }
    raw.push_str(&generated);

    let code = substitute_directives(&raw, &directives);
    log::debug!(
        "transpiled script {} for {} ({} directives)",
        tree.script.name.normalized(),
        game,
        directives.len()
    );

    Ok(TranspileResult { code, directives })
}
