use std::path::PathBuf;

use thiserror::Error;

use crate::game::Game;

/// Every failure aborts the whole transpile call; no partial output is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranspileError {
    #[error("unknown game \"{0}\", expected one of: {}", Game::NAMES.join(", "))]
    InvalidConfiguration(String),

    #[error("unsupported feature \"{construct}\": requires game {required}")]
    UnsupportedFeature { construct: String, required: Game },

    #[error("include not found: {}", .0.display())]
    IncludeNotFound(PathBuf),

    #[error("include \"{}\" could not be read: {message}", .path.display())]
    IncludeRead { path: PathBuf, message: String },

    #[error("malformed property \"{name}\": {reason}")]
    MalformedProperty { name: String, reason: String },

    #[error("malformed initializer: {0}")]
    MalformedInitializer(String),
}

impl TranspileError {
    pub fn unsupported(construct: impl Into<String>, required: Game) -> Self {
        Self::UnsupportedFeature {
            construct: construct.into(),
            required,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            Self::UnsupportedFeature { .. } => "UNSUPPORTED_FEATURE",
            Self::IncludeNotFound(_) => "INCLUDE_NOT_FOUND",
            Self::IncludeRead { .. } => "INCLUDE_READ",
            Self::MalformedProperty { .. } => "MALFORMED_PROPERTY",
            Self::MalformedInitializer(_) => "MALFORMED_INITIALIZER",
        }
    }
}
