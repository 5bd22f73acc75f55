//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::context::ContextOverrides;

/// skycli - manage clusters, credentials and apps on the cloud platform.
#[derive(Parser, Debug, Clone)]
#[command(name = "skycli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the global config file.
    #[arg(long, env = "SKYCLI_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Use this context instead of the current one.
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// App name, overriding skygear.yaml.
    #[arg(long, global = true)]
    pub app: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    pub format: Format,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable informational logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Flags that feed context resolution.
    #[must_use]
    pub fn overrides(&self) -> ContextOverrides {
        ContextOverrides {
            context: self.context.clone(),
            app: self.app.clone(),
            debug: self.debug,
            verbose: self.verbose,
        }
    }

    /// Default log filter implied by `--debug` / `--verbose`.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Inspect and edit the global configuration.
    Config {
        /// Config subcommand to execute.
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Stored credentials.
    Auth {
        /// Auth subcommand to execute.
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// App selection.
    App {
        /// App subcommand to execute.
        #[command(subcommand)]
        command: AppCommands,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show the configuration.
    View,

    /// List contexts.
    GetContexts,

    /// Set the current context.
    UseContext {
        /// Context name.
        name: String,
    },

    /// List configured clusters.
    ListClusters,

    /// Switch to the context of a cluster.
    UseCluster {
        /// Cluster name.
        name: String,
    },

    /// Add or update a cluster and make it current.
    SetCluster(SetClusterArgs),

    /// Remove a context.
    DeleteContext {
        /// Context name.
        name: String,
    },
}

/// Arguments for `config set-cluster`.
#[derive(Args, Debug, Clone)]
pub struct SetClusterArgs {
    /// Cluster name (letters, digits and dashes).
    #[arg(long)]
    pub name: String,

    /// Cluster API endpoint.
    #[arg(long)]
    pub endpoint: String,

    /// Cluster API key.
    #[arg(long = "api-key")]
    pub api_key: String,

    /// Environment tag of the cluster.
    #[arg(long)]
    pub env: Option<String>,
}

/// Auth subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommands {
    /// Show who is logged in on the current context.
    Whoami,

    /// Forget the credentials of the current context.
    Logout,
}

/// App subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AppCommands {
    /// Show the app commands will act on.
    Current,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_view() {
        let cli = Cli::parse_from(["skycli", "config", "view"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::View
            }
        ));
    }

    #[test]
    fn parse_use_context() {
        let cli = Cli::parse_from(["skycli", "config", "use-context", "staging"]);
        match cli.command {
            Commands::Config {
                command: ConfigCommands::UseContext { name },
            } => assert_eq!(name, "staging"),
            _ => panic!("expected use-context command"),
        }
    }

    #[test]
    fn parse_set_cluster() {
        let cli = Cli::parse_from([
            "skycli",
            "config",
            "set-cluster",
            "--name",
            "prod",
            "--endpoint",
            "https://controller.example.com",
            "--api-key",
            "secret",
        ]);
        match cli.command {
            Commands::Config {
                command: ConfigCommands::SetCluster(args),
            } => {
                assert_eq!(args.name, "prod");
                assert_eq!(args.endpoint, "https://controller.example.com");
                assert_eq!(args.api_key, "secret");
                assert!(args.env.is_none());
            }
            _ => panic!("expected set-cluster command"),
        }
    }

    #[test]
    fn set_cluster_requires_endpoint() {
        let result = Cli::try_parse_from(["skycli", "config", "set-cluster", "--name", "prod"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "skycli", "auth", "whoami", "--context", "ctx", "--format", "json", "--app", "myapp",
        ]);
        assert_eq!(cli.format, Format::Json);
        let overrides = cli.overrides();
        assert_eq!(overrides.context.as_deref(), Some("ctx"));
        assert_eq!(overrides.app.as_deref(), Some("myapp"));
    }

    #[test]
    fn log_level_follows_flags() {
        assert_eq!(Cli::parse_from(["skycli", "app", "current"]).log_level(), "warn");
        assert_eq!(Cli::parse_from(["skycli", "-v", "app", "current"]).log_level(), "info");
        assert_eq!(
            Cli::parse_from(["skycli", "-v", "--debug", "app", "current"]).log_level(),
            "debug"
        );
    }

    #[test]
    fn config_flag_takes_a_path() {
        let cli = Cli::parse_from(["skycli", "--config", "/tmp/skycli.yaml", "config", "view"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/skycli.yaml")));
    }
}
