//! File-backed config store.
//!
//! The file is read once, migrated in memory and written back whole. Writes
//! go to a uniquely named temp file in the same directory that is renamed over
//! the target, so a crash never leaves a half-written config behind. A failed
//! write removes its temp file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};
use crate::migrate::migrate_owned;
use crate::schema::{LegacyConfig, RawConfig, SkycliConfig};

/// The global config loaded from a file, plus where to write it back.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    config: SkycliConfig,
    migrated: bool,
}

impl ConfigStore {
    /// Opens the config at `path`. A missing file yields an empty config.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not hold a valid config.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = read_raw(&path)?;
        let migrated = matches!(&raw, RawConfig::Legacy(legacy) if *legacy != LegacyConfig::default());
        if migrated {
            warn!(path = %path.display(), "config uses the legacy layout; it will be upgraded on the next save");
        }
        let config = migrate_owned(raw);
        debug!(
            path = %path.display(),
            clusters = config.clusters().len(),
            users = config.users().len(),
            contexts = config.contexts().len(),
            "loaded config"
        );
        Ok(Self {
            path,
            config,
            migrated,
        })
    }

    /// Reads and migrates the config at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::open`].
    pub fn load(path: &Path) -> Result<SkycliConfig> {
        Ok(Self::open(path)?.config)
    }

    /// Writes `config` to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Fails if serialization or any filesystem step fails.
    pub fn save(config: &SkycliConfig, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(config).map_err(|e| ConfigError::Serialize {
            reason: e.to_string(),
        })?;

        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
                parent
            }
            None => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| ConfigError::io(parent, e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| ConfigError::io(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| ConfigError::io(path, e.error))?;

        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Path the config was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded config.
    pub const fn config(&self) -> &SkycliConfig {
        &self.config
    }

    /// Whether the file on disk was in the legacy layout.
    pub const fn was_migrated(&self) -> bool {
        self.migrated
    }

    /// Replaces the in-memory config. Nothing is written until [`persist`](Self::persist).
    pub fn replace(&mut self, config: SkycliConfig) {
        self.config = config;
    }

    /// Writes the in-memory config back to its path.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::save`].
    pub fn persist(&mut self) -> Result<()> {
        Self::save(&self.config, &self.path)?;
        self.migrated = false;
        info!(path = %self.path.display(), "config updated");
        Ok(())
    }
}

fn read_raw(path: &Path) -> Result<RawConfig> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, starting empty");
            return Ok(RawConfig::Legacy(LegacyConfig::default()));
        }
        Err(e) => return Err(ConfigError::io(path, e)),
    };

    if text.trim().is_empty() {
        return Ok(RawConfig::Legacy(LegacyConfig::default()));
    }

    let value: serde_yaml::Value = serde_yaml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    RawConfig::from_yaml_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ClusterConfig, UserConfig};

    fn dir_entries(dir: &Path) -> Vec<PathBuf> {
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)
            .expect("read dir")
            .map(|entry| entry.expect("entry").path())
            .collect();
        entries.sort();
        entries
    }

    const LEGACY: &str = "cluster:\n  default:\n    endpoint: http://controller\n    api_key: key\n    env: cloud\ncontext:\n  default:\n    cluster: default\n    user: default\ncurrent_context: default\n";

    #[test]
    fn missing_file_is_an_empty_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::open(dir.path().join("config.yaml")).expect("open");
        assert_eq!(store.config(), &SkycliConfig::new());
        assert!(!store.was_migrated());
    }

    #[test]
    fn empty_file_is_an_empty_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        fs::write(&path, "\n").expect("write");
        assert_eq!(ConfigStore::load(&path).expect("load"), SkycliConfig::new());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        fs::write(&path, "clusters: [unterminated\n").expect("write");
        let err = ConfigStore::load(&path).expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn save_creates_parent_dirs_and_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("skycli").join("config.yaml");
        let config = SkycliConfig::new()
            .update_cluster("prod", |_| ClusterConfig {
                endpoint: "https://prod".into(),
                api_key: "key".into(),
                env: None,
                ..ClusterConfig::default()
            })
            .update_user("prod", |_| UserConfig {
                access_token: "token".into(),
                user: Some(serde_json::json!({ "id": "u1", "metadata": {} })),
                ..UserConfig::default()
            })
            .with_current_context(Some("prod".into()));

        ConfigStore::save(&config, &path).expect("save");
        assert_eq!(dir_entries(path.parent().expect("parent")), vec![path.clone()]);
        assert_eq!(ConfigStore::load(&path).expect("load"), config);
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A directory cannot be replaced by a file.
        let path = dir.path().join("config.yaml");
        fs::create_dir(&path).expect("mkdir");

        let err = ConfigStore::save(&SkycliConfig::new(), &path).expect_err("save over a dir");
        assert!(matches!(err, ConfigError::Io { .. }), "{err}");
        assert_eq!(dir_entries(dir.path()), vec![path]);
    }

    #[test]
    fn stale_temp_name_does_not_block_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        fs::create_dir(dir.path().join("config.yaml.tmp")).expect("mkdir");

        ConfigStore::save(&SkycliConfig::new(), &path).expect("save");
        assert_eq!(ConfigStore::load(&path).expect("load"), SkycliConfig::new());
    }

    #[test]
    fn unmodeled_fields_survive_persist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "api_version: v1\n\
             telemetry: disabled\n\
             users:\n  - name: me\n    user: {access_token: t, expires_at: 1700000000}\n\
             current_context: me\n",
        )
        .expect("write");

        let mut store = ConfigStore::open(&path).expect("open");
        store.replace(store.config().with_current_context(None));
        store.persist().expect("persist");

        let written = fs::read_to_string(&path).expect("read");
        assert!(written.contains("telemetry: disabled"), "{written}");
        assert!(written.contains("expires_at: 1700000000"), "{written}");
        assert!(!written.contains("current_context"), "{written}");
    }

    #[test]
    fn legacy_file_is_upgraded_on_persist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        fs::write(&path, LEGACY).expect("write");

        let mut store = ConfigStore::open(&path).expect("open");
        assert!(store.was_migrated());
        assert_eq!(store.config().clusters()[0].name, "default");
        assert_eq!(store.config().current_context.as_deref(), Some("default"));

        store.persist().expect("persist");
        assert!(!store.was_migrated());

        let written = fs::read_to_string(&path).expect("read");
        assert!(written.starts_with("api_version: v1"));
        assert!(!written.contains("cluster:\n  default"));
        assert!(!ConfigStore::open(&path).expect("reopen").was_migrated());
    }

    #[test]
    fn json_file_is_accepted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"api_version":"v1","contexts":[{"name":"c","context":{"cluster":"k"}}],"current_context":"c"}"#,
        )
        .expect("write");
        let config = ConfigStore::load(&path).expect("load");
        assert_eq!(config.get_context("c").map(|c| c.cluster.as_str()), Some("k"));
    }

    #[test]
    fn replace_does_not_write_until_persist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        let mut store = ConfigStore::open(&path).expect("open");
        store.replace(store.config().with_current_context(Some("x".into())));
        assert!(!path.exists());
        store.persist().expect("persist");
        assert_eq!(
            ConfigStore::load(&path).expect("load").current_context.as_deref(),
            Some("x")
        );
    }
}
