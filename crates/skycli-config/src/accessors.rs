//! Immutable update/get/delete accessors on [`SkycliConfig`].
//!
//! Every mutator borrows the config and returns a new one; the argument is
//! never modified. Update inserts on a miss, delete of an unknown name returns
//! an equal config, and get returns `None`. None of them can fail.

use crate::entry::{find_entry, remove_entry, upsert_entry, NamedEntry};
use crate::schema::{ClusterConfig, ConfigContext, ContextEntry, SkycliConfig, UserConfig};

impl SkycliConfig {
    /// Returns a config whose user `name` holds `updater(previous)`.
    pub fn update_user<F>(&self, name: &str, updater: F) -> Self
    where
        F: FnOnce(Option<&UserConfig>) -> UserConfig,
    {
        Self {
            users: Some(upsert_entry(self.users.as_deref(), name, updater)),
            ..self.clone()
        }
    }

    /// Returns the stored credentials for user `name`.
    pub fn get_user(&self, name: &str) -> Option<&UserConfig> {
        find_entry(self.users.as_deref(), name).map(NamedEntry::payload)
    }

    /// Returns a config without user `name`.
    #[must_use]
    pub fn delete_user(&self, name: &str) -> Self {
        Self {
            users: remove_entry(self.users.as_deref(), name),
            ..self.clone()
        }
    }

    /// Returns a config whose cluster `name` holds `updater(previous)`.
    pub fn update_cluster<F>(&self, name: &str, updater: F) -> Self
    where
        F: FnOnce(Option<&ClusterConfig>) -> ClusterConfig,
    {
        Self {
            clusters: Some(upsert_entry(self.clusters.as_deref(), name, updater)),
            ..self.clone()
        }
    }

    /// Returns cluster `name`.
    pub fn get_cluster(&self, name: &str) -> Option<&ClusterConfig> {
        find_entry(self.clusters.as_deref(), name).map(NamedEntry::payload)
    }

    /// Returns a config without cluster `name`.
    #[must_use]
    pub fn delete_cluster(&self, name: &str) -> Self {
        Self {
            clusters: remove_entry(self.clusters.as_deref(), name),
            ..self.clone()
        }
    }

    /// Returns a config whose context `name` holds `updater(previous)`.
    pub fn update_context<F>(&self, name: &str, updater: F) -> Self
    where
        F: FnOnce(Option<&ConfigContext>) -> ConfigContext,
    {
        Self {
            contexts: Some(upsert_entry(self.contexts.as_deref(), name, updater)),
            ..self.clone()
        }
    }

    /// Returns context `name`.
    pub fn get_context(&self, name: &str) -> Option<&ConfigContext> {
        find_entry(self.contexts.as_deref(), name).map(NamedEntry::payload)
    }

    /// Returns a config without context `name`.
    #[must_use]
    pub fn delete_context(&self, name: &str) -> Self {
        Self {
            contexts: remove_entry(self.contexts.as_deref(), name),
            ..self.clone()
        }
    }

    /// Returns a config pointing at `context` (or at nothing).
    #[must_use]
    pub fn with_current_context(&self, context: Option<String>) -> Self {
        Self {
            current_context: context,
            ..self.clone()
        }
    }

    /// First context that references cluster `cluster`.
    pub fn find_context_by_cluster(&self, cluster: &str) -> Option<&ContextEntry> {
        self.contexts()
            .iter()
            .find(|entry| entry.context.cluster == cluster)
    }
}
