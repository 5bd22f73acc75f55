//! Resolution of the execution context a command runs in.
//!
//! A command sees the world through a [`CliContext`]: the cluster and user
//! named by the active context, the app from `skygear.yaml`, and the logging
//! flags. Command-line flags take precedence over both files.

use skycli_config::{ClusterConfig, ProjectConfig, SkycliConfig, UserConfig};
use tracing::debug;

use crate::error::CliError;

/// Flags that override what the config files say.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOverrides {
    /// Context to use instead of `current_context`.
    pub context: Option<String>,
    /// App to use instead of the one in `skygear.yaml`.
    pub app: Option<String>,
    /// Debug output requested.
    pub debug: bool,
    /// Verbose output requested.
    pub verbose: bool,
}

/// Everything a command needs to know about where it is running.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliContext {
    /// Name of the context in effect.
    pub current_context: Option<String>,
    /// Cluster referenced by the context, if it exists.
    pub cluster: Option<ClusterConfig>,
    /// Name of the user entry referenced by the context.
    pub user_name: Option<String>,
    /// User referenced by the context, if it exists.
    pub user: Option<UserConfig>,
    /// App commands act on.
    pub app: Option<String>,
    /// Debug output requested.
    pub debug: bool,
    /// Verbose output requested.
    pub verbose: bool,
}

impl CliContext {
    /// Resolves the context from the loaded config, the project file and flags.
    ///
    /// References that point at nothing resolve to `None` rather than failing;
    /// commands state what they need through the `require_*` helpers.
    #[must_use]
    pub fn resolve(
        config: &SkycliConfig,
        project: Option<&ProjectConfig>,
        overrides: &ContextOverrides,
    ) -> Self {
        let current_context = overrides
            .context
            .clone()
            .or_else(|| config.current_context.clone());

        let context = current_context
            .as_deref()
            .and_then(|name| config.get_context(name));
        let cluster = context
            .and_then(|ctx| config.get_cluster(&ctx.cluster))
            .cloned();
        let user_name = context.and_then(|ctx| ctx.user.clone());
        let user = user_name
            .as_deref()
            .and_then(|name| config.get_user(name))
            .cloned();

        let app = overrides
            .app
            .clone()
            .or_else(|| project.and_then(|p| p.app.clone()));

        debug!(
            context = current_context.as_deref().unwrap_or("-"),
            has_cluster = cluster.is_some(),
            has_user = user.is_some(),
            app = app.as_deref().unwrap_or("-"),
            "resolved cli context"
        );

        Self {
            current_context,
            cluster,
            user_name,
            user,
            app,
            debug: overrides.debug,
            verbose: overrides.verbose,
        }
    }

    /// The cluster, provided it has an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Precondition`] when no usable cluster is configured.
    pub fn require_cluster(&self) -> Result<&ClusterConfig, CliError> {
        self.cluster
            .as_ref()
            .filter(|cluster| !cluster.endpoint.is_empty())
            .ok_or_else(|| {
                CliError::Precondition(
                    "missing cluster API endpoint\nTo setup, please run:\n    skycli config set-cluster"
                        .into(),
                )
            })
    }

    /// The user, provided it holds an access token.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Precondition`] when nobody is logged in.
    pub fn require_user(&self) -> Result<&UserConfig, CliError> {
        self.user
            .as_ref()
            .filter(|user| !user.access_token.is_empty())
            .ok_or_else(|| {
                CliError::Precondition(match self.current_context.as_deref() {
                    Some(context) => format!(
                        "requires authentication: no credentials stored for context '{context}'"
                    ),
                    None => "requires authentication: no current context is set".into(),
                })
            })
    }

    /// The app name.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Precondition`] when no app is selected.
    pub fn require_app(&self) -> Result<&str, CliError> {
        self.app.as_deref().filter(|app| !app.is_empty()).ok_or_else(|| {
            CliError::Precondition(
                "no app selected: add `app: <name>` to skygear.yaml or pass --app".into(),
            )
        })
    }
}
