//! Project configuration from `.quest/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::file::GoalFile;

/// Directory under the project root that holds quest configuration.
pub const CONFIG_DIR: &str = ".quest";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestConfig {
    /// Save file for the goal store. Relative paths resolve against the
    /// project root.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("goals.txt")
}

impl QuestConfig {
    /// Path of the config file for a project root.
    pub fn path_for(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_DIR).join("config.toml")
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, GoalError> {
        let content = std::fs::read_to_string(path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| GoalError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load `<root>/.quest/config.toml`, falling back to defaults when it
    /// does not exist. A file that exists but fails to parse is an error.
    pub fn load_or_default(project_root: &Path) -> Result<Self, GoalError> {
        let path = Self::path_for(project_root);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// The goal file this config points at, resolved against `project_root`.
    pub fn goal_file(&self, project_root: &Path) -> GoalFile {
        GoalFile::new(project_root.join(&self.data_file))
    }
}
