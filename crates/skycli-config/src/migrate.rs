//! Schema migration from any readable layout to the current one.
//!
//! Migration is a single structural pass dispatched on the detected layout.
//! Each known layout upgrades directly to `v1`; a later `v2` adds a
//! [`RawConfig`] variant and one arm here.

use std::borrow::Cow;

use tracing::debug;

use crate::entry::entries_from_map;
use crate::schema::{LegacyConfig, RawConfig, SkycliConfig, API_VERSION};

/// Upgrades `raw` to the current layout without touching it.
///
/// A document that is already current comes back borrowed, so callers can
/// tell with [`Cow::is_borrowed`] (or pointer identity) that nothing changed.
pub fn migrate(raw: &RawConfig) -> Cow<'_, SkycliConfig> {
    match raw {
        RawConfig::Current(config) => Cow::Borrowed(config),
        RawConfig::Legacy(legacy) => Cow::Owned(upgrade_legacy(legacy)),
    }
}

/// Consuming form of [`migrate`].
pub fn migrate_owned(raw: RawConfig) -> SkycliConfig {
    match raw {
        RawConfig::Current(config) => config,
        RawConfig::Legacy(legacy) => upgrade_legacy(&legacy),
    }
}

fn upgrade_legacy(legacy: &LegacyConfig) -> SkycliConfig {
    debug!(
        clusters = legacy.cluster.as_ref().map_or(0, |m| m.len()),
        users = legacy.user.as_ref().map_or(0, |m| m.len()),
        contexts = legacy.context.as_ref().map_or(0, |m| m.len()),
        "upgrading legacy config to {API_VERSION}"
    );

    // A legacy document may carry `api_version: null`; the upgraded one
    // declares its own.
    let mut extra = legacy.extra.clone();
    extra.remove("api_version");

    SkycliConfig {
        api_version: API_VERSION.to_string(),
        clusters: legacy.cluster.as_ref().map(entries_from_map),
        users: legacy.user.as_ref().map(entries_from_map),
        contexts: legacy.context.as_ref().map(entries_from_map),
        current_context: legacy.current_context.clone(),
        extra,
    }
}
