pub mod ast;
pub mod error;
pub mod game;

pub use ast::*;
pub use error::TranspileError;
pub use game::{Feature, Game};
