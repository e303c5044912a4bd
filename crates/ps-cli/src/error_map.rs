use std::fmt::Display;

use ps_core::TranspileError;
use thiserror::Error;

/// Every command failure ends up here: a stable code plus a human message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct CliError {
    pub code: String,
    pub message: String,
}

impl CliError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<TranspileError> for CliError {
    fn from(error: TranspileError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

fn map_error(code: &'static str, error: impl Display) -> CliError {
    CliError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: CliError) -> i32 {
    log::error!("{}", error);
    1
}

pub(crate) fn map_cli_input_read(error: std::io::Error) -> CliError {
    map_error("CLI_INPUT_READ", error)
}

pub(crate) fn map_cli_output_write(error: std::io::Error) -> CliError {
    map_error("CLI_OUTPUT_WRITE", error)
}

pub(crate) fn map_cli_manifest_read(error: std::io::Error) -> CliError {
    map_error("CLI_MANIFEST_READ", error)
}

pub(crate) fn map_cli_manifest_invalid(error: serde_yaml::Error) -> CliError {
    map_error("CLI_MANIFEST_INVALID", error)
}

pub(crate) fn map_cli_manifest_write(error: std::io::Error) -> CliError {
    map_error("CLI_MANIFEST_WRITE", error)
}

pub(crate) fn map_cli_source_pattern(error: glob::PatternError) -> CliError {
    map_error("CLI_SOURCE_PATTERN", error)
}

pub(crate) fn map_cli_source_scan(error: walkdir::Error) -> CliError {
    map_error("CLI_SOURCE_SCAN", error)
}

pub(crate) fn map_cli_compiler_spawn(error: std::io::Error) -> CliError {
    map_error("CLI_COMPILER_SPAWN", error)
}

pub(crate) fn map_cli_init_io(error: std::io::Error) -> CliError {
    map_error("CLI_INIT_IO", error)
}

#[cfg(test)]
mod error_map_tests {
    use super::*;
    use ps_core::Game;

    #[test]
    fn emit_error_returns_non_zero_exit_code() {
        let code = emit_error(CliError::new("ERR", "failed"));
        assert_eq!(code, 1);
    }

    #[test]
    fn transpile_errors_keep_their_codes() {
        let error = CliError::from(TranspileError::unsupported("struct", Game::Fallout4));
        assert_eq!(error.code, "UNSUPPORTED_FEATURE");
        assert!(error.message.contains("struct"));
        assert_eq!(
            CliError::from(TranspileError::InvalidConfiguration("Starfield".to_string())).code,
            "INVALID_CONFIGURATION"
        );
    }

    #[test]
    fn mapping_helpers_keep_error_codes() {
        assert_eq!(
            map_cli_input_read(std::io::Error::other("read")).code,
            "CLI_INPUT_READ"
        );
        assert_eq!(
            map_cli_output_write(std::io::Error::other("write")).code,
            "CLI_OUTPUT_WRITE"
        );
        assert_eq!(
            map_cli_manifest_read(std::io::Error::other("read")).code,
            "CLI_MANIFEST_READ"
        );
        assert_eq!(
            map_cli_manifest_write(std::io::Error::other("write")).code,
            "CLI_MANIFEST_WRITE"
        );
        assert_eq!(
            map_cli_compiler_spawn(std::io::Error::other("spawn")).code,
            "CLI_COMPILER_SPAWN"
        );
        assert_eq!(map_cli_init_io(std::io::Error::other("io")).code, "CLI_INIT_IO");

        let invalid = serde_yaml::from_str::<serde_yaml::Value>("a: [").expect_err("invalid yaml");
        assert_eq!(map_cli_manifest_invalid(invalid).code, "CLI_MANIFEST_INVALID");

        let pattern = glob::Pattern::new("src/[").expect_err("invalid pattern");
        assert_eq!(map_cli_source_pattern(pattern).code, "CLI_SOURCE_PATTERN");
    }
}
