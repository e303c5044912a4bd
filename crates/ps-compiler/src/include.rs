use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use ps_core::TranspileError;

use crate::directives::strip_quotes;

/// Reads one include file relative to `include_root`. The text is opaque:
/// directives inside it are not expanded.
pub fn read_include(include_root: &Path, raw_path: &str) -> Result<String, TranspileError> {
    let path = include_root.join(strip_quotes(raw_path));
    match fs::read_to_string(&path) {
        Ok(text) => {
            log::debug!("included {} ({} bytes)", path.display(), text.len());
            Ok(text)
        }
        Err(error) if error.kind() == ErrorKind::NotFound => {
            Err(TranspileError::IncludeNotFound(path))
        }
        Err(error) => Err(TranspileError::IncludeRead {
            path,
            message: error.to_string(),
        }),
    }
}
