//! # skycli-cli
//!
//! Command-line interface for managing cluster connections, credentials and
//! the app a project directory deploys to.
//!
//! # Architecture
//!
//! `main` opens the global config through [`skycli_config::ConfigStore`],
//! looks for a project `skygear.yaml`, and resolves a [`context::CliContext`]
//! from both plus the command-line flags. Commands receive the store and the
//! context explicitly; there is no process-wide config.
//!
//! ```text
//! ┌──────────────┐   migrate    ┌─────────────┐   resolve   ┌────────────┐
//! │ config.yaml  │─────────────►│ ConfigStore │────────────►│ CliContext │
//! └──────────────┘              └─────────────┘             └────────────┘
//!        ▲                             │ replace/persist           │
//!        └─────────────────────────────┘◄──────── commands ◄───────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod output;
pub mod template;

pub use cli::{AppCommands, AuthCommands, Cli, Commands, ConfigCommands, Format};
pub use context::{CliContext, ContextOverrides};
pub use error::CliError;
pub use output::OutputFormat;
