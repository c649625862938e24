//! Snapshot reconciliation
//!
//! Diffs a freshly sampled snapshot against the committed [`StateTracker`]
//! and produces the lifecycle events that happened in between.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use buffwatch_types::BuffWatchConfig;

use crate::buff::{Buff, BuffKey, SourceResolver};
use crate::events::{BuffEvent, BuffSummary};

use super::StateTracker;

/// Computes lifecycle events from consecutive snapshots.
///
/// Always produces the full event set; per-category suppression belongs to
/// the dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciler {
    resolver: SourceResolver,
    /// Remaining whole seconds at or below which a buff is warned about
    warning_threshold_secs: u64,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::from_config(&BuffWatchConfig::default())
    }
}

impl Reconciler {
    pub fn new(warning_threshold_secs: u64, resolver: SourceResolver) -> Self {
        Self {
            resolver,
            warning_threshold_secs,
        }
    }

    pub fn from_config(config: &BuffWatchConfig) -> Self {
        Self::new(
            u64::from(config.warning_threshold_seconds),
            SourceResolver::new(config.use_description_as_source),
        )
    }

    pub fn warning_threshold_secs(&self) -> u64 {
        self.warning_threshold_secs
    }

    /// Reconcile one snapshot against `state` and commit the result.
    ///
    /// `None` means the host had nothing to report this tick (world not
    /// loaded yet); state is left untouched and no events are produced.
    /// `Some(&[])` means nothing is active, so every tracked buff ends.
    ///
    /// Events come out as: starts, then warnings, then ends. Within each
    /// group they are ordered by (name, source).
    pub fn reconcile(&self, snapshot: Option<&[Buff]>, state: &mut StateTracker) -> Vec<BuffEvent> {
        let Some(snapshot) = snapshot else {
            tracing::trace!("No buff data this tick, keeping tracked state");
            return Vec::new();
        };

        let current = self.collect_current(snapshot);

        let mut current_sources: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for key in current.keys() {
            current_sources
                .entry(key.source.clone())
                .or_default()
                .insert(key.name.clone());
        }

        let mut events = Vec::new();
        let started = detect_starts(&current, state, &mut events);

        let mut warned = state.warned_set().clone();
        let warnings = self.detect_warnings(&current, &mut warned, &mut events);

        let ended = detect_ends(&current_sources, state, &mut warned, &mut events);

        if !events.is_empty() {
            tracing::debug!(
                tracked = current.len(),
                started,
                warnings,
                ended,
                "Reconciled buff snapshot"
            );
        }
        for event in &events {
            tracing::trace!(?event, "Buff event");
        }

        let active = current
            .into_iter()
            .map(|(key, buff)| (key, buff.seconds_remaining()))
            .collect();
        state.commit(active, current_sources, warned);

        events
    }

    /// Filter the snapshot down to trackable buffs, keyed by identity.
    ///
    /// When the host reports the same (name, source) twice, the instance with
    /// the most time left represents the key.
    fn collect_current<'a>(&self, snapshot: &'a [Buff]) -> BTreeMap<BuffKey, &'a Buff> {
        let mut current: BTreeMap<BuffKey, &Buff> = BTreeMap::new();

        for buff in snapshot.iter().filter(|b| b.is_trackable()) {
            let key = BuffKey::new(buff.display_name.as_str(), self.resolver.resolve(buff));
            match current.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(buff);
                }
                Entry::Occupied(mut slot) => {
                    if buff.remaining_ms > slot.get().remaining_ms {
                        slot.insert(buff);
                    }
                }
            }
        }

        current
    }

    /// Warn once per continuous lifetime for every buff at or below the
    /// threshold. Returns the number of warnings emitted.
    fn detect_warnings(
        &self,
        current: &BTreeMap<BuffKey, &Buff>,
        warned: &mut BTreeSet<BuffKey>,
        events: &mut Vec<BuffEvent>,
    ) -> usize {
        let mut count = 0;

        for (key, buff) in current {
            let seconds_remaining = buff.seconds_remaining();
            if seconds_remaining > self.warning_threshold_secs {
                continue;
            }
            if warned.insert(key.clone()) {
                events.push(BuffEvent::ExpiringSoon {
                    buff: BuffSummary::from_buff(buff),
                    source: key.source.clone(),
                    seconds_remaining,
                });
                count += 1;
            }
        }

        count
    }
}

/// Emit start events for keys absent from `state`. Returns the number of
/// events emitted.
///
/// A source with nothing tracked gets one `SourceStarted` bundling all of its
/// buffs in this snapshot; a new buff from a tracked source gets an
/// `AdditionalBuffFromSource`.
fn detect_starts(
    current: &BTreeMap<BuffKey, &Buff>,
    state: &StateTracker,
    events: &mut Vec<BuffEvent>,
) -> usize {
    let mut started_sources: BTreeSet<&str> = BTreeSet::new();
    let mut count = 0;

    for (key, buff) in current {
        if state.is_active(key) {
            continue;
        }

        if !state.has_source(&key.source) {
            if !started_sources.insert(key.source.as_str()) {
                continue;
            }
            // Map order is (name, source), so this is already sorted by name
            let buffs = current
                .iter()
                .filter(|(k, _)| k.source == key.source)
                .map(|(_, b)| BuffSummary::from_buff(b))
                .collect();
            events.push(BuffEvent::SourceStarted {
                source: key.source.clone(),
                buffs,
            });
        } else {
            events.push(BuffEvent::AdditionalBuffFromSource {
                source: key.source.clone(),
                buff: BuffSummary::from_buff(buff),
            });
        }
        count += 1;
    }

    count
}

/// Emit end events for tracked keys missing from the snapshot and drop them
/// from `warned`. Returns the number of events emitted.
///
/// Several buffs from one source ending together with nothing left from that
/// source produce a single `SourceEnded`.
fn detect_ends(
    current_sources: &BTreeMap<String, BTreeSet<String>>,
    state: &StateTracker,
    warned: &mut BTreeSet<BuffKey>,
    events: &mut Vec<BuffEvent>,
) -> usize {
    let mut ended_sources: BTreeSet<&str> = BTreeSet::new();
    let mut count = 0;

    for key in state.active_keys() {
        let still_active = current_sources
            .get(&key.source)
            .is_some_and(|names| names.contains(&key.name));
        if still_active {
            continue;
        }

        warned.remove(key);

        let last_of_source = current_sources
            .get(&key.source)
            .is_none_or(|names| names.is_empty());
        if last_of_source && !ended_sources.insert(key.source.as_str()) {
            continue;
        }

        events.push(BuffEvent::ended(key, last_of_source));
        count += 1;
    }

    count
}
