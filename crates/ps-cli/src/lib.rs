use std::ffi::OsString;

use clap::Parser;

mod build;
mod cli_args;
mod error_map;
mod init;
mod manifest;
mod source_loader;
mod transpile;
mod version;

pub(crate) use cli_args::{BuildArgs, Cli, InitArgs, Mode, TranspileArgs};
pub use error_map::CliError;
pub(crate) use error_map::{
    emit_error, map_cli_compiler_spawn, map_cli_init_io, map_cli_input_read,
    map_cli_manifest_invalid, map_cli_manifest_read, map_cli_manifest_write,
    map_cli_output_write, map_cli_source_pattern, map_cli_source_scan,
};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            if let Err(print_error) = error.print() {
                log::error!("failed to print usage: {}", print_error);
            }
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command {
        Mode::Build(args) => build::run_build(args),
        Mode::Transpile(args) => transpile::run_transpile(args),
        Mode::Init(args) => init::run_init(args),
        Mode::Version => Ok(version::run_version()),
    }
}
