//! Where skycli keeps its files.

use std::path::PathBuf;

/// Directory name under the platform config directory.
pub const APP_DIR: &str = "skycli";

/// File name of the global config.
pub const CONFIG_FILE: &str = "config.yaml";

/// Platform config directory for skycli, falling back to the working directory.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default location of the global config file.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}
