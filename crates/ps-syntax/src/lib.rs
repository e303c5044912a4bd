//! Boundary with the external front-end.
//!
//! The parser itself lives outside this workspace and hands its tree over as
//! JSON. Problems are reported through an [`ErrorListener`]; a tree is still
//! returned when only identifier checks fail, so callers must consult
//! [`ErrorListener::had_error`] before asking for code generation.

mod listener;
mod tree_reader;

pub use listener::{ErrorListener, Position, SyntaxDiagnostic, SyntaxErrorListener};
pub use tree_reader::{read_syntax_tree, validate_identifiers};
