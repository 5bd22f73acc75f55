//! Project-local `skygear.yaml`, naming the app a directory deploys to.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// File name of the project config.
pub const PROJECT_FILE: &str = "skygear.yaml";

/// The subset of `skygear.yaml` skycli reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// App this directory belongs to.
    #[serde(default)]
    pub app: Option<String>,
}

impl ProjectConfig {
    /// Reads `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Looks for [`PROJECT_FILE`] in `start` and each of its ancestors.
    ///
    /// # Errors
    ///
    /// Fails if a project file is found but cannot be read or parsed.
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>> {
        for dir in start.ancestors() {
            let candidate = dir.join(PROJECT_FILE);
            match fs::metadata(&candidate) {
                Ok(meta) if meta.is_file() => {
                    debug!(path = %candidate.display(), "found project config");
                    let project = Self::load(&candidate)?;
                    return Ok(Some((candidate, project)));
                }
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(ConfigError::io(candidate, e)),
            }
        }
        Ok(None)
    }
}
