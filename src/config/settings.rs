use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Defaults read from `settings.yaml` next to the file list. Command-line
/// flags override every field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Worker command run as `<command> <file> <outfile>`.
    pub command: Option<String>,
    pub shuffle: bool,
    pub skip: usize,
    pub exclude_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::RunnerError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
