use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "paperscript")]
#[command(about = "PaperScript to Papyrus transpiler")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// build a project (requires a project.yaml)
    Build(BuildArgs),
    /// transpiles a single file
    Transpile(TranspileArgs),
    /// creates a new project.yaml
    Init(InitArgs),
    /// prints version information
    Version,
}

#[derive(Debug, Args)]
pub(crate) struct TranspileArgs {
    #[arg(value_name = "INPUT FILE")]
    pub(crate) input: PathBuf,
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_FILE")]
    pub(crate) output: Option<PathBuf>,
    /// Output to STDOUT instead of a file
    #[arg(short = 's', long = "stdout")]
    pub(crate) stdout: bool,
    /// select which game this script is for (SkyrimSE, FO4, Starfield)
    #[arg(short = 'g', long = "game", default_value = "SkyrimSE")]
    pub(crate) game: String,
}

#[derive(Debug, Args)]
pub(crate) struct BuildArgs {
    /// do not run the papyrus compiler
    #[arg(short = 'n', long = "no-compile")]
    pub(crate) no_compile: bool,
    #[arg(long = "project-dir", default_value = ".")]
    pub(crate) project_dir: PathBuf,
}

#[derive(Debug, Args)]
pub(crate) struct InitArgs {
    /// Force creating a project in a non-empty directory
    #[arg(short = 'f', long = "force")]
    pub(crate) force: bool,
    #[arg(long = "project-dir", default_value = ".")]
    pub(crate) project_dir: PathBuf,
}
