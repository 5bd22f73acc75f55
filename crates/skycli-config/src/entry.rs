//! Generic helpers over `{name, payload}` entry lists.
//!
//! Clusters, users and contexts share one storage pattern: a list of entries
//! keyed by a unique name. Everything here works on any [`NamedEntry`] so the
//! three lists are handled by the same code. Lookups are by exact name and the
//! first match wins when a hand-edited file contains duplicates.

use indexmap::IndexMap;

use crate::schema::{
    ClusterConfig, ClusterEntry, ConfigContext, ContextEntry, UserConfig, UserEntry,
};

/// A list entry carrying a unique name and a payload.
pub trait NamedEntry: Clone {
    /// The value stored under the name.
    type Payload: Clone;

    /// Builds an entry from its parts.
    fn new(name: String, payload: Self::Payload) -> Self;

    /// The entry's key.
    fn name(&self) -> &str;

    /// The entry's value.
    fn payload(&self) -> &Self::Payload;
}

macro_rules! named_entry {
    ($entry:ty, $payload:ty, $field:ident) => {
        impl NamedEntry for $entry {
            type Payload = $payload;

            fn new(name: String, payload: $payload) -> Self {
                Self {
                    name,
                    $field: payload,
                }
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn payload(&self) -> &$payload {
                &self.$field
            }
        }
    };
}

named_entry!(ClusterEntry, ClusterConfig, cluster);
named_entry!(UserEntry, UserConfig, user);
named_entry!(ContextEntry, ConfigContext, context);

/// Converts a legacy name-keyed map into an entry list, keeping key order.
pub fn entries_from_map<E: NamedEntry>(map: &IndexMap<String, E::Payload>) -> Vec<E> {
    map.iter()
        .map(|(name, payload)| E::new(name.clone(), payload.clone()))
        .collect()
}

/// Returns the first entry called `name`.
pub fn find_entry<'a, E: NamedEntry>(entries: Option<&'a [E]>, name: &str) -> Option<&'a E> {
    entries?.iter().find(|entry| entry.name() == name)
}

/// Returns a new list where the first entry called `name` holds
/// `updater(previous payload)`, or with a new entry appended when there was none.
pub fn upsert_entry<E, F>(entries: Option<&[E]>, name: &str, updater: F) -> Vec<E>
where
    E: NamedEntry,
    F: FnOnce(Option<&E::Payload>) -> E::Payload,
{
    let mut next = entries.map(<[E]>::to_vec).unwrap_or_default();
    match next.iter().position(|entry| entry.name() == name) {
        Some(index) => {
            let payload = updater(Some(next[index].payload()));
            next[index] = E::new(name.to_string(), payload);
        }
        None => {
            let payload = updater(None);
            next.push(E::new(name.to_string(), payload));
        }
    }
    next
}

/// Returns a new list without the first entry called `name`.
///
/// An absent list stays absent.
pub fn remove_entry<E: NamedEntry>(entries: Option<&[E]>, name: &str) -> Option<Vec<E>> {
    let mut next = entries?.to_vec();
    if let Some(index) = next.iter().position(|entry| entry.name() == name) {
        next.remove(index);
    }
    Some(next)
}
