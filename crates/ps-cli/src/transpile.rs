use std::fs;
use std::path::{Path, PathBuf};

use ps_compiler::{strip_quotes, transpile, TranspileOptions};

use crate::source_loader::{default_output_path, include_root_for, load_syntax_tree, resolve_input};
use crate::{map_cli_output_write, CliError, TranspileArgs};

pub(crate) fn run_transpile(args: TranspileArgs) -> Result<i32, CliError> {
    let input = resolve_input(&args.input)?;
    let options =
        TranspileOptions::new(args.game.as_str()).with_include_root(include_root_for(&input));

    if args.stdout {
        log::debug!("transpiling file {}", input.display());
        let tree = load_syntax_tree(&input)?;
        let result = transpile(&tree, &options)?;
        print!("{}", result.code);
        return Ok(0);
    }

    let output = args.output.unwrap_or_else(|| default_output_path(&input));
    let output_dir = output_dir(&output);
    if !output_dir.is_dir() {
        return Err(CliError::new(
            "CLI_OUTPUT_DIR_MISSING",
            format!(
                "part of the output path {} does not exist",
                output_dir.display()
            ),
        ));
    }

    log::debug!("transpiling file {}", input.display());
    let tree = load_syntax_tree(&input)?;
    let result = transpile(&tree, &options)?;

    let output = match result.output_file_name() {
        Some(name) => {
            log::debug!(
                "script has an OutputFileName directive, using {} as the output file",
                name
            );
            output_dir.join(strip_quotes(name))
        }
        None => output,
    };

    fs::write(&output, &result.code).map_err(map_cli_output_write)?;
    log::debug!("transpiled {} to {}", input.display(), output.display());
    log::info!("done");
    Ok(0)
}

pub(crate) fn output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
