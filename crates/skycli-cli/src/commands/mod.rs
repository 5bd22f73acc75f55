//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`config`] - Contexts, clusters and the current context
//! - [`auth`] - Stored credentials
//! - [`app`] - App selection

pub mod app;
pub mod auth;
pub mod config;

pub use app::AppCommand;
pub use auth::AuthCommand;
pub use config::ConfigCommand;
