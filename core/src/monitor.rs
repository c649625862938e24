//! Host-facing driver
//!
//! [`BuffMonitor`] is what a host's tick handler owns. It decides when to
//! sample, runs reconciliation against its own [`StateTracker`], and hands
//! the resulting events to a dispatcher behind the notification switches.

use buffwatch_types::BuffWatchConfig;

use crate::buff::Buff;
use crate::events::BuffEvent;
use crate::notify::{EventDispatcher, FilteredDispatcher};
use crate::tracking::{Reconciler, StateTracker};

/// Tracks buffs across host ticks and dispatches lifecycle notifications.
#[derive(Debug)]
pub struct BuffMonitor<D> {
    state: StateTracker,
    reconciler: Reconciler,
    dispatcher: FilteredDispatcher<D>,
    sample_interval_ticks: u64,
}

impl<D: EventDispatcher> BuffMonitor<D> {
    pub fn new(config: &BuffWatchConfig, dispatcher: D) -> Self {
        let config = config.clamped();
        Self {
            state: StateTracker::new(),
            reconciler: Reconciler::from_config(&config),
            dispatcher: FilteredDispatcher::new(dispatcher, &config),
            sample_interval_ticks: u64::from(config.sample_interval_ticks),
        }
    }

    /// Apply new settings without touching tracked buffs.
    pub fn set_config(&mut self, config: &BuffWatchConfig) {
        let config = config.clamped();
        self.reconciler = Reconciler::from_config(&config);
        self.dispatcher.set_config(&config);
        self.sample_interval_ticks = u64::from(config.sample_interval_ticks);
        tracing::debug!(
            threshold = config.warning_threshold_seconds,
            interval = config.sample_interval_ticks,
            "Buff monitor settings updated"
        );
    }

    /// Host update callback. Samples on every `sample_interval_ticks`-th
    /// tick; `snapshot` is only called on those ticks.
    ///
    /// Returns the events computed this tick (before notification filtering).
    pub fn on_update_ticked<F>(&mut self, tick: u64, snapshot: F) -> Vec<BuffEvent>
    where
        F: FnOnce() -> Option<Vec<Buff>>,
    {
        if tick % self.sample_interval_ticks != 0 {
            return Vec::new();
        }
        let buffs = snapshot();
        self.sample(buffs.as_deref())
    }

    /// Reconcile a snapshot right away and dispatch the results.
    pub fn sample(&mut self, snapshot: Option<&[Buff]>) -> Vec<BuffEvent> {
        let events = self.reconciler.reconcile(snapshot, &mut self.state);
        self.dispatcher.dispatch_all(&events);
        events
    }

    pub fn on_day_started(&mut self) {
        tracing::info!(tracked = self.state.len(), "Day started, clearing buff state");
        self.state.reset_all();
    }

    pub fn on_save_loaded(&mut self) {
        tracing::info!(tracked = self.state.len(), "Save loaded, clearing buff state");
        self.state.reset_all();
    }

    /// Forget all tracked buffs.
    pub fn reset_all(&mut self) {
        self.state.reset_all();
    }

    pub fn state(&self) -> &StateTracker {
        &self.state
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn dispatcher(&self) -> &D {
        self.dispatcher.inner()
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        self.dispatcher.inner_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buff::StatDeltas;
    use crate::notify::{NotificationKind, NotificationQueue};

    fn energized(remaining_ms: i64) -> Buff {
        Buff {
            id: "1".to_string(),
            display_name: "Energized".to_string(),
            source: Some("Coffee".to_string()),
            description: None,
            remaining_ms,
            effects: StatDeltas {
                speed: 2,
                ..Default::default()
            },
        }
    }

    fn make_monitor(config: &BuffWatchConfig) -> BuffMonitor<NotificationQueue> {
        BuffMonitor::new(config, NotificationQueue::new())
    }

    #[test]
    fn test_full_lifecycle_notifications() {
        let mut monitor = make_monitor(&BuffWatchConfig::default());

        monitor.sample(Some(&[energized(20_000)]));
        monitor.sample(Some(&[energized(9_000)]));
        monitor.sample(Some(&[energized(8_000)]));
        monitor.sample(Some(&[]));

        let notifications = monitor.dispatcher_mut().take_notifications();
        let kinds: Vec<_> = notifications.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::Start,
                NotificationKind::Warning,
                NotificationKind::End
            ]
        );
        assert_eq!(notifications[0].message, "Coffee: Energized (Speed +2)");
        assert_eq!(notifications[1].message, "Energized from Coffee expires in 9s");
        assert_eq!(notifications[2].message, "Effects from Coffee have ended");
    }

    #[test]
    fn test_disabled_category_still_tracks_state() {
        let config = BuffWatchConfig {
            show_buff_expiring_warnings: false,
            ..Default::default()
        };
        let mut monitor = make_monitor(&config);

        let events = monitor.sample(Some(&[energized(5_000)]));
        assert_eq!(events.len(), 2, "Reconciler always computes every event");
        assert_eq!(monitor.dispatcher().len(), 1, "Warning should be filtered");

        // Turning warnings back on must not re-warn an already-warned buff
        monitor.set_config(&BuffWatchConfig::default());
        assert!(monitor.sample(Some(&[energized(4_000)])).is_empty());
    }

    #[test]
    fn test_samples_on_interval() {
        let config = BuffWatchConfig {
            sample_interval_ticks: 30,
            ..Default::default()
        };
        let mut monitor = make_monitor(&config);
        let mut calls = 0;

        for tick in 0..61 {
            monitor.on_update_ticked(tick, || {
                calls += 1;
                Some(vec![energized(20_000)])
            });
        }

        assert_eq!(calls, 3, "ticks 0, 30 and 60");
        assert_eq!(monitor.dispatcher().len(), 1);
    }

    #[test]
    fn test_no_data_tick_keeps_state() {
        let mut monitor = make_monitor(&BuffWatchConfig::default());
        monitor.sample(Some(&[energized(20_000)]));

        let events = monitor.on_update_ticked(0, || None);
        assert!(events.is_empty());
        assert_eq!(monitor.state().len(), 1);
    }

    #[test]
    fn test_day_start_and_save_load_reset() {
        let mut monitor = make_monitor(&BuffWatchConfig::default());

        monitor.sample(Some(&[energized(20_000)]));
        monitor.on_day_started();
        assert!(monitor.state().is_empty());
        assert_eq!(monitor.sample(Some(&[energized(20_000)])).len(), 1);

        monitor.on_save_loaded();
        assert!(monitor.state().is_empty());
        assert_eq!(monitor.sample(Some(&[energized(20_000)])).len(), 1);

        monitor.reset_all();
        assert!(monitor.state().is_empty());
    }

    #[test]
    fn test_config_is_clamped() {
        let config = BuffWatchConfig {
            warning_threshold_seconds: 0,
            sample_interval_ticks: 0,
            ..Default::default()
        };
        let monitor = make_monitor(&config);
        assert_eq!(monitor.reconciler().warning_threshold_secs(), 1);
    }
}
