//! Code generation backend: walks a [`ps_core::SyntaxTree`] and emits
//! target-language source for the selected game.

mod declarations;
mod directives;
mod expressions;
mod generator;
mod include;
mod pipeline;
mod statements;
mod substitute;

pub use directives::{preprocess, strip_quotes, DirectiveTable, Preprocessed};
pub use generator::CodeGenerator;
pub use include::read_include;
pub use pipeline::{transpile, TranspileOptions, TranspileResult};
pub use substitute::substitute_directives;

pub const COMPILER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod compiler_test_support;
