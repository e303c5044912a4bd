use std::fs;

use crate::manifest::{ProjectManifest, MANIFEST_FILE};
use crate::{map_cli_init_io, map_cli_manifest_invalid, map_cli_manifest_write, CliError, InitArgs};

pub(crate) fn run_init(args: InitArgs) -> Result<i32, CliError> {
    let root = args.project_dir.as_path();
    let manifest_path = root.join(MANIFEST_FILE);
    if manifest_path.exists() {
        return Err(CliError::new(
            "CLI_PROJECT_EXISTS",
            "this directory already contains a project.yaml file",
        ));
    }

    let non_empty = fs::read_dir(root)
        .map_err(map_cli_init_io)?
        .next()
        .is_some();
    if non_empty && !args.force {
        return Err(CliError::new(
            "CLI_DIR_NOT_EMPTY",
            "this directory is not empty, if you're sure you want to create a project here, run with '--force'",
        ));
    }

    log::info!("creating a new project");
    let manifest = ProjectManifest::scaffold();

    let src = root.join("src");
    if !src.is_dir() {
        log::debug!("the src/ directory doesn't exist, creating");
        fs::create_dir_all(&src).map_err(map_cli_init_io)?;
    }

    let yaml = serde_yaml::to_string(&manifest).map_err(map_cli_manifest_invalid)?;
    fs::write(&manifest_path, yaml).map_err(map_cli_manifest_write)?;

    log::info!("project created");
    log::warn!("game paths in project.yaml are relative to the project, point them at your installation");
    log::info!("please check the project.yaml file before building");
    Ok(0)
}
