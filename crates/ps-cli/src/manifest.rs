use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{map_cli_manifest_invalid, map_cli_manifest_read, CliError};

pub(crate) const MANIFEST_FILE: &str = "project.yaml";
pub(crate) const DEFAULT_SOURCE_GLOB: &str = "**/*.pps.json";

/// `project.yaml`. Relative paths are resolved against the project directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectManifest {
    pub(crate) project_name: String,
    pub(crate) project_version: String,
    pub(crate) script_folder_path: PathBuf,
    pub(crate) script_output_path: PathBuf,
    pub(crate) papyrus_flags_path: PathBuf,
    pub(crate) papyrus_compiler_path: PathBuf,
    #[serde(default = "default_source_glob")]
    pub(crate) source_glob: String,
    #[serde(default)]
    pub(crate) global_defines: IndexMap<String, serde_yaml::Value>,
    #[serde(default = "default_game")]
    pub(crate) game: String,
}

fn default_source_glob() -> String {
    DEFAULT_SOURCE_GLOB.to_string()
}

fn default_game() -> String {
    "SkyrimSE".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProjectPaths {
    pub(crate) script_folder: PathBuf,
    pub(crate) script_output: PathBuf,
    pub(crate) flags: PathBuf,
    pub(crate) compiler: PathBuf,
}

impl ProjectManifest {
    /// Manifest written by `init`, laid out like a game installation rooted
    /// at the project directory.
    pub(crate) fn scaffold() -> Self {
        let script_folder_path = Path::new("Data").join("Scripts").join("Source");
        let mut global_defines = IndexMap::new();
        global_defines.insert(
            "DEBUG".to_string(),
            serde_yaml::Value::String("true".to_string()),
        );
        Self {
            project_name: "New Project".to_string(),
            project_version: "1.0.0".to_string(),
            papyrus_flags_path: script_folder_path.join("TESV_Papyrus_Flags.flg"),
            script_output_path: Path::new("Data").join("Scripts"),
            papyrus_compiler_path: Path::new("Papyrus Compiler").join("PapyrusCompiler.exe"),
            script_folder_path,
            source_glob: format!("src/{}", DEFAULT_SOURCE_GLOB),
            global_defines,
            game: default_game(),
        }
    }

    pub(crate) fn paths(&self, project_dir: &Path) -> ProjectPaths {
        ProjectPaths {
            script_folder: project_dir.join(&self.script_folder_path),
            script_output: project_dir.join(&self.script_output_path),
            flags: project_dir.join(&self.papyrus_flags_path),
            compiler: project_dir.join(&self.papyrus_compiler_path),
        }
    }

    /// Global defines as directive values. A bare key (`DEBUG:`) counts as `true`.
    pub(crate) fn defines(&self) -> Result<IndexMap<String, String>, CliError> {
        let mut defines = IndexMap::with_capacity(self.global_defines.len());
        for (name, value) in &self.global_defines {
            let value = match value {
                serde_yaml::Value::Null => "true".to_string(),
                serde_yaml::Value::Bool(flag) => flag.to_string(),
                serde_yaml::Value::Number(number) => number.to_string(),
                serde_yaml::Value::String(text) => text.clone(),
                _ => {
                    return Err(CliError::new(
                        "CLI_MANIFEST_INVALID",
                        format!("global define \"{}\" must be a scalar", name),
                    ))
                }
            };
            defines.insert(name.clone(), value);
        }
        Ok(defines)
    }
}

pub(crate) fn load_manifest(project_dir: &Path) -> Result<ProjectManifest, CliError> {
    let path = project_dir.join(MANIFEST_FILE);
    if !path.is_file() {
        return Err(CliError::new(
            "CLI_PROJECT_NOT_FOUND",
            "no project found, initialize with 'paperscript init'",
        ));
    }
    let raw = fs::read_to_string(&path).map_err(map_cli_manifest_read)?;
    parse_manifest(&raw)
}

pub(crate) fn parse_manifest(raw: &str) -> Result<ProjectManifest, CliError> {
    serde_yaml::from_str(raw).map_err(map_cli_manifest_invalid)
}
