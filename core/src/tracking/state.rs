//! Committed reconciliation state

use std::collections::{BTreeMap, BTreeSet};

use crate::buff::BuffKey;

/// Everything known about active buffs as of the last reconciliation.
///
/// Invariants, upheld by [`Reconciler`](super::Reconciler) which is the only
/// writer:
/// - `sources` is exactly the (source -> names) projection of `active`'s keys
/// - `warned` is a subset of `active`'s keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateTracker {
    /// Key -> whole seconds remaining at the last sample
    active: BTreeMap<BuffKey, u64>,
    /// Source label -> names of active buffs granted by it
    sources: BTreeMap<String, BTreeSet<String>>,
    /// Keys that already fired an expiry warning in their current lifetime
    warned: BTreeSet<BuffKey>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything. Used on day start and save load, where buff
    /// identity cannot be carried across.
    pub fn reset_all(&mut self) {
        self.active.clear();
        self.sources.clear();
        self.warned.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of tracked buffs
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, key: &BuffKey) -> bool {
        self.active.contains_key(key)
    }

    pub fn is_warned(&self, key: &BuffKey) -> bool {
        self.warned.contains(key)
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.sources.contains_key(source)
    }

    /// Seconds remaining for a tracked key at the last sample
    pub fn seconds_remaining(&self, key: &BuffKey) -> Option<u64> {
        self.active.get(key).copied()
    }

    /// Names of active buffs granted by `source`
    pub fn buffs_from(&self, source: &str) -> impl Iterator<Item = &str> {
        self.sources
            .get(source)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn active_keys(&self) -> impl Iterator<Item = &BuffKey> {
        self.active.keys()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn warned_keys(&self) -> impl Iterator<Item = &BuffKey> {
        self.warned.iter()
    }

    /// Check the structural invariants. Cheap enough for tests and debug builds.
    pub fn is_consistent(&self) -> bool {
        let index_matches = self.active.keys().all(|key| {
            self.sources
                .get(&key.source)
                .is_some_and(|names| names.contains(&key.name))
        }) && self.sources.iter().all(|(source, names)| {
            !names.is_empty()
                && names
                    .iter()
                    .all(|name| self.active.contains_key(&BuffKey::new(name, source)))
        });

        index_matches && self.warned.iter().all(|key| self.active.contains_key(key))
    }

    /// Replace all three structures in one step.
    pub(super) fn commit(
        &mut self,
        active: BTreeMap<BuffKey, u64>,
        sources: BTreeMap<String, BTreeSet<String>>,
        warned: BTreeSet<BuffKey>,
    ) {
        self.active = active;
        self.sources = sources;
        self.warned = warned;
        debug_assert!(self.is_consistent(), "buff state out of sync: {self:?}");
    }

    pub(super) fn warned_set(&self) -> &BTreeSet<BuffKey> {
        &self.warned
    }
}
