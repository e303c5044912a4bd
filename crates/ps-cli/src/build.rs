use std::fs;
use std::path::Path;
use std::process::Command;

use ps_compiler::{transpile, TranspileOptions};

use crate::manifest::{load_manifest, ProjectPaths};
use crate::source_loader::{discover_sources, include_root_for, load_syntax_tree, psc_file_name};
use crate::{map_cli_compiler_spawn, map_cli_output_write, BuildArgs, CliError};

pub(crate) fn run_build(args: BuildArgs) -> Result<i32, CliError> {
    let project_dir = args.project_dir.as_path();
    let manifest = load_manifest(project_dir)?;
    let paths = manifest.paths(project_dir);

    require_dir(&paths.script_folder, "the script directory")?;
    require_dir(&paths.script_output, "the script output directory")?;
    if !args.no_compile {
        require_file(&paths.flags, "the papyrus flags file")?;
        require_file(&paths.compiler, "the papyrus compiler executable")?;
    }

    let sources = discover_sources(project_dir, &manifest.source_glob)?;
    if sources.is_empty() {
        return Err(CliError::new(
            "CLI_NO_SOURCES",
            "no source files found, nothing to do",
        ));
    }

    log::info!(
        "building project {} v{}",
        manifest.project_name,
        manifest.project_version
    );
    let options = TranspileOptions::new(manifest.game.as_str()).with_defines(manifest.defines()?);

    let mut failed = 0usize;
    for source in &sources {
        log::debug!("transpiling {}", source.display());
        let tree = load_syntax_tree(source)?;
        let options = options.clone().with_include_root(include_root_for(source));
        let result = transpile(&tree, &options)?;

        let output_path = paths.script_folder.join(psc_file_name(source));
        fs::write(&output_path, &result.code).map_err(map_cli_output_write)?;
        log::debug!(
            "transpiled file {} -> {}",
            source.display(),
            output_path.display()
        );

        if !args.no_compile && !compile(&paths, &output_path)? {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(CliError::new(
            "CLI_COMPILE_FAILED",
            format!("{} of {} script(s) failed to compile", failed, sources.len()),
        ));
    }

    log::info!("done");
    Ok(0)
}

fn require_dir(path: &Path, what: &str) -> Result<(), CliError> {
    if path.is_dir() {
        return Ok(());
    }
    Err(CliError::new(
        "CLI_PATH_NOT_FOUND",
        format!("{} does not exist: {}", what, path.display()),
    ))
}

fn require_file(path: &Path, what: &str) -> Result<(), CliError> {
    if path.is_file() {
        return Ok(());
    }
    Err(CliError::new(
        "CLI_PATH_NOT_FOUND",
        format!("{} does not exist: {}", what, path.display()),
    ))
}

/// Runs the engine compiler on one generated file. Returns whether it succeeded.
fn compile(paths: &ProjectPaths, script: &Path) -> Result<bool, CliError> {
    log::debug!("compiling papyrus script {}", script.display());
    let output = Command::new(&paths.compiler)
        .arg(script)
        .arg(format!("-i={}", paths.script_folder.display()))
        .arg(format!("-o={}", paths.script_output.display()))
        .arg(format!("-f={}", paths.flags.display()))
        .arg("-q")
        .output()
        .map_err(map_cli_compiler_spawn)?;

    for line in String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
    {
        log::info!("[Papyrus Compiler] {}", line);
    }

    if output.status.success() {
        return Ok(true);
    }

    log::error!("compilation failed:");
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        log::error!("[Papyrus Compiler] {}", line);
    }
    Ok(false)
}
