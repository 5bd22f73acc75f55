//! Configuration store for skycli.
//!
//! The global config file records every cluster a developer has connected to,
//! the credentials held for each, and named contexts pairing the two. This
//! crate owns:
//!
//! - the on-disk schema ([`SkycliConfig`]) and the legacy layout it replaced
//!   ([`LegacyConfig`]);
//! - [`migrate`], which upgrades any readable document to the current layout;
//! - immutable accessors (`update_user`, `get_user`, `delete_user`, ...) on
//!   [`SkycliConfig`];
//! - [`ConfigStore`], which binds all of the above to a file.
//!
//! ```text
//! file ──parse──► RawConfig ──migrate──► SkycliConfig ──accessors──► SkycliConfig ──save──► file
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod accessors;
pub mod entry;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod project;
pub mod schema;
pub mod store;

pub use entry::NamedEntry;
pub use error::{ConfigError, Result};
pub use migrate::{migrate, migrate_owned};
pub use paths::default_config_path;
pub use project::ProjectConfig;
pub use schema::{
    ClusterConfig, ClusterEntry, ConfigContext, ContextEntry, Extra, LegacyConfig, RawConfig,
    SkycliConfig, UserConfig, UserEntry, API_VERSION,
};
pub use store::ConfigStore;
