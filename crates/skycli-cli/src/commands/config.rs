//! `skycli config` command implementation.
//!
//! Reads and edits the global config: contexts, clusters and which context is
//! current. Every mutating subcommand writes the file exactly once.

use std::io::Write;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use skycli_config::{ClusterConfig, ConfigContext, ConfigStore, SkycliConfig, UserConfig};
use tracing::info;

use crate::cli::{ConfigCommands, SetClusterArgs};
use crate::context::CliContext;
use crate::error::CliError;
use crate::output::{current_marker, truncate, Message, OutputFormat, TableDisplay};

/// Handler for config subcommands.
pub struct ConfigCommand<'a> {
    store: &'a mut ConfigStore,
    context: &'a CliContext,
}

impl<'a> ConfigCommand<'a> {
    /// Creates a new config command handler.
    #[must_use]
    pub fn new(store: &'a mut ConfigStore, context: &'a CliContext) -> Self {
        Self { store, context }
    }

    /// Executes the config subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if a named entry does not exist, an argument is invalid,
    /// or the config cannot be written.
    pub fn execute<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        command: &ConfigCommands,
    ) -> Result<(), CliError> {
        match command {
            ConfigCommands::View => format.write(out, self.store.config()),
            ConfigCommands::GetContexts => self.get_contexts(out, format),
            ConfigCommands::UseContext { name } => self.use_context(out, format, name),
            ConfigCommands::ListClusters => self.list_clusters(out, format),
            ConfigCommands::UseCluster { name } => self.use_cluster(out, format, name),
            ConfigCommands::SetCluster(args) => self.set_cluster(out, format, args),
            ConfigCommands::DeleteContext { name } => self.delete_context(out, format, name),
        }
    }

    fn get_contexts<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let config = self.store.config();
        let current = self.context.current_context.as_deref();
        let contexts = config
            .contexts()
            .iter()
            .map(|entry| ContextRow {
                current: current == Some(entry.name.as_str()),
                name: entry.name.clone(),
                cluster: entry.context.cluster.clone(),
                user: entry
                    .context
                    .user
                    .as_deref()
                    .and_then(|name| config.get_user(name))
                    .and_then(UserConfig::login_id)
                    .map(str::to_string),
            })
            .collect();

        format.write(out, &ContextList { contexts })
    }

    fn use_context<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
    ) -> Result<(), CliError> {
        let config = self.store.config();
        if config.get_context(name).is_none() {
            return Err(CliError::NotFound(format!(
                "context '{name}' not found; use `skycli config get-contexts` to list valid contexts"
            )));
        }

        let updated = config.with_current_context(Some(name.to_string()));
        self.store.replace(updated);
        self.store.persist()?;

        format.write(out, &Message::success(format!("Current context set to {name}.")))
    }

    fn list_clusters<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let config = self.store.config();
        let current_cluster = self
            .context
            .current_context
            .as_deref()
            .and_then(|name| config.get_context(name))
            .map(|ctx| ctx.cluster.as_str());

        let clusters = config
            .clusters()
            .iter()
            .map(|entry| ClusterRow {
                current: current_cluster == Some(entry.name.as_str()),
                name: entry.name.clone(),
                endpoint: entry.cluster.endpoint.clone(),
                env: entry.cluster.env.clone(),
            })
            .collect();

        format.write(out, &ClusterList { clusters })
    }

    fn use_cluster<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
    ) -> Result<(), CliError> {
        let config = self.store.config();
        let context_name = config
            .find_context_by_cluster(name)
            .map(|entry| entry.name.clone())
            .ok_or_else(|| {
                CliError::NotFound(format!(
                    "cluster '{name}' not configured; use `skycli config list-clusters` to list valid clusters"
                ))
            })?;

        let updated = config.with_current_context(Some(context_name.clone()));
        self.store.replace(updated);
        self.store.persist()?;

        format.write(
            out,
            &Message::success(format!("Current cluster set to {context_name}.")),
        )
    }

    fn set_cluster<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        args: &SetClusterArgs,
    ) -> Result<(), CliError> {
        validate_cluster_name(&args.name)?;
        if args.endpoint.trim().is_empty() {
            return Err(CliError::InvalidArgument("cluster API endpoint is required".into()));
        }
        if args.api_key.trim().is_empty() {
            return Err(CliError::InvalidArgument("cluster API key is required".into()));
        }

        let name = args.name.as_str();
        let config = self.store.config().update_cluster(name, |prev| {
            let prev = prev.cloned().unwrap_or_default();
            ClusterConfig {
                endpoint: args.endpoint.clone(),
                api_key: args.api_key.clone(),
                env: args.env.clone().or(prev.env),
                extra: prev.extra,
            }
        });

        let existing = config
            .find_context_by_cluster(name)
            .map(|entry| entry.name.clone());
        let (config, context_name) = match existing {
            Some(context_name) => (config, context_name),
            None => {
                let config = config.update_context(name, |_| ConfigContext {
                    cluster: name.to_string(),
                    user: Some(name.to_string()),
                    ..ConfigContext::default()
                });
                (config, name.to_string())
            }
        };

        self.store
            .replace(config.with_current_context(Some(context_name.clone())));
        self.store.persist()?;
        info!(cluster = name, context = %context_name, "cluster configured");

        format.write(
            out,
            &Message::success(format!(
                "Connected to cluster {name} at {}. Current context set to {context_name}.",
                args.endpoint
            )),
        )
    }

    fn delete_context<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
    ) -> Result<(), CliError> {
        let config = self.store.config();
        if config.get_context(name).is_none() {
            return Err(CliError::NotFound(format!("context '{name}' not found")));
        }

        let mut updated = config.delete_context(name);
        if updated.current_context.as_deref() == Some(name) {
            updated = updated.with_current_context(None);
        }
        self.store.replace(updated);
        self.store.persist()?;

        format.write(out, &Message::success(format!("Deleted context {name}.")))
    }
}

/// Cluster names become context and user names.
static CLUSTER_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").unwrap_or_else(|_| unreachable!()));

fn validate_cluster_name(name: &str) -> Result<(), CliError> {
    if CLUSTER_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(CliError::InvalidArgument(format!(
            "cluster name '{name}' must contain only alphanumeric characters and dash"
        )))
    }
}

// Output types

/// List of contexts.
#[derive(Debug, Clone, Serialize)]
pub struct ContextList {
    /// Contexts in file order.
    pub contexts: Vec<ContextRow>,
}

/// One context row.
#[derive(Debug, Clone, Serialize)]
pub struct ContextRow {
    /// Whether this is the context in effect.
    pub current: bool,
    /// Context name.
    pub name: String,
    /// Cluster name.
    pub cluster: String,
    /// Login id of the context's user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// List of clusters.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterList {
    /// Clusters in file order.
    pub clusters: Vec<ClusterRow>,
}

/// One cluster row.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterRow {
    /// Whether the current context uses this cluster.
    pub current: bool,
    /// Cluster name.
    pub name: String,
    /// API endpoint.
    pub endpoint: String,
    /// Environment tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

impl TableDisplay for SkycliConfig {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CliError::Format(format!("YAML serialization failed: {e}")))?;
        write!(writer, "{yaml}")?;
        Ok(())
    }
}

impl TableDisplay for ContextList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.contexts.is_empty() {
            writeln!(writer, "No contexts configured")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<8} {:<20} {:<20} {:<32}",
            "CURRENT", "NAME", "CLUSTER", "USER"
        )?;
        for row in &self.contexts {
            writeln!(
                writer,
                "{:<8} {:<20} {:<20} {:<32}",
                current_marker(row.current),
                truncate(&row.name, 20),
                truncate(&row.cluster, 20),
                row.user.as_deref().unwrap_or("")
            )?;
        }
        Ok(())
    }
}

impl TableDisplay for ClusterList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.clusters.is_empty() {
            writeln!(writer, "No clusters configured")?;
            return Ok(());
        }

        writeln!(writer, "{:<8} {:<20} {:<40}", "CURRENT", "NAME", "ENDPOINT")?;
        for row in &self.clusters {
            writeln!(
                writer,
                "{:<8} {:<20} {:<40}",
                current_marker(row.current),
                truncate(&row.name, 20),
                row.endpoint
            )?;
        }
        Ok(())
    }
}
