use std::fs;
use std::path::{Path, PathBuf};

use ps_core::SyntaxTree;
use ps_syntax::{read_syntax_tree, ErrorListener, SyntaxErrorListener};
use walkdir::WalkDir;

use crate::{map_cli_input_read, map_cli_source_pattern, map_cli_source_scan, CliError};

pub(crate) fn resolve_input(input: &Path) -> Result<PathBuf, CliError> {
    if !input.is_file() {
        return Err(CliError::new(
            "CLI_INPUT_NOT_FOUND",
            format!("no such file {}", input.display()),
        ));
    }
    Ok(input.to_path_buf())
}

/// Reads one serialized tree. Any diagnostic from the front-end is fatal.
pub(crate) fn load_syntax_tree(path: &Path) -> Result<SyntaxTree, CliError> {
    let source = fs::read_to_string(path).map_err(map_cli_input_read)?;
    let mut listener = SyntaxErrorListener::new();
    let tree = read_syntax_tree(&source, &mut listener);

    match tree {
        Some(tree) if !listener.had_error() => Ok(tree),
        _ => {
            let first = listener
                .diagnostics()
                .first()
                .map(|diagnostic| diagnostic.message.clone())
                .unwrap_or_default();
            Err(CliError::new(
                "CLI_SYNTAX_ERROR",
                format!(
                    "{}: {} syntax error(s), first: {}",
                    path.display(),
                    listener.diagnostics().len(),
                    first
                ),
            ))
        }
    }
}

/// Directory include paths of a script resolve against.
pub(crate) fn include_root_for(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `Foo.pps.json` becomes `Foo.psc`; the serialization suffix is dropped first.
pub(crate) fn psc_file_name(input: &Path) -> PathBuf {
    let without_json = if input.extension().is_some_and(|ext| ext == "json") {
        input.with_extension("")
    } else {
        input.to_path_buf()
    };
    let file_name = without_json
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_default();
    file_name.with_extension("psc")
}

pub(crate) fn default_output_path(input: &Path) -> PathBuf {
    input.with_file_name(psc_file_name(input))
}

/// Files under `root` whose `/`-separated relative path matches `source_glob`, sorted.
pub(crate) fn discover_sources(root: &Path, source_glob: &str) -> Result<Vec<PathBuf>, CliError> {
    let pattern = glob::Pattern::new(source_glob).map_err(map_cli_source_pattern)?;
    let mut sources = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(map_cli_source_scan)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        if pattern.matches(&relative) {
            sources.push(path.to_path_buf());
        }
    }

    Ok(sources)
}
