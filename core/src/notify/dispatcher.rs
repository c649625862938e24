use chrono::{Local, NaiveDateTime};

use buffwatch_types::BuffWatchConfig;

use crate::events::{BuffEvent, EventCategory};

use super::{Notification, NotificationKind};

/// Consumer of reconciled buff events.
pub trait EventDispatcher {
    fn dispatch(&mut self, event: &BuffEvent);

    fn dispatch_all(&mut self, events: &[BuffEvent]) {
        for event in events {
            self.dispatch(event);
        }
    }
}

impl<D: EventDispatcher + ?Sized> EventDispatcher for &mut D {
    fn dispatch(&mut self, event: &BuffEvent) {
        (**self).dispatch(event);
    }
}

impl<D: EventDispatcher + ?Sized> EventDispatcher for Box<D> {
    fn dispatch(&mut self, event: &BuffEvent) {
        (**self).dispatch(event);
    }
}

/// Records raw events as-is.
impl EventDispatcher for Vec<BuffEvent> {
    fn dispatch(&mut self, event: &BuffEvent) {
        self.push(event.clone());
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Writes each event as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDispatcher;

impl EventDispatcher for LogDispatcher {
    fn dispatch(&mut self, event: &BuffEvent) {
        let notification = Notification::render(event, now());
        match notification.kind {
            NotificationKind::Warning => tracing::warn!(
                source = event.source(),
                message = %notification.message,
                "Buff expiring"
            ),
            kind => tracing::info!(
                source = event.source(),
                ?kind,
                message = %notification.message,
                "Buff notification"
            ),
        }
    }
}

/// Collects rendered notifications until drained.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take any pending notifications (drains the queue)
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

impl EventDispatcher for NotificationQueue {
    fn dispatch(&mut self, event: &BuffEvent) {
        self.pending.push(Notification::render(event, now()));
    }
}

/// Applies the start / warning / end notification switches before
/// forwarding to `inner`.
#[derive(Debug)]
pub struct FilteredDispatcher<D> {
    inner: D,
    show_start: bool,
    show_warning: bool,
    show_end: bool,
}

impl<D: EventDispatcher> FilteredDispatcher<D> {
    pub fn new(inner: D, config: &BuffWatchConfig) -> Self {
        let mut filtered = Self {
            inner,
            show_start: true,
            show_warning: true,
            show_end: true,
        };
        filtered.set_config(config);
        filtered
    }

    /// Pick up new switch values (e.g. after the settings file changed)
    pub fn set_config(&mut self, config: &BuffWatchConfig) {
        self.show_start = config.show_buff_start_notifications;
        self.show_warning = config.show_buff_expiring_warnings;
        self.show_end = config.show_buff_end_notifications;
    }

    pub fn allows(&self, category: EventCategory) -> bool {
        match category {
            EventCategory::Start => self.show_start,
            EventCategory::Warning => self.show_warning,
            EventCategory::End => self.show_end,
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: EventDispatcher> EventDispatcher for FilteredDispatcher<D> {
    fn dispatch(&mut self, event: &BuffEvent) {
        if self.allows(event.category()) {
            self.inner.dispatch(event);
        } else {
            tracing::trace!(?event, "Notification suppressed by settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_events() -> Vec<BuffEvent> {
        let summary = crate::events::BuffSummary {
            id: "1".to_string(),
            name: "Energized".to_string(),
            effects: "Speed +2".to_string(),
            seconds_remaining: 9,
        };
        vec![
            BuffEvent::SourceStarted {
                source: "Coffee".to_string(),
                buffs: vec![summary.clone()],
            },
            BuffEvent::AdditionalBuffFromSource {
                source: "Coffee".to_string(),
                buff: summary.clone(),
            },
            BuffEvent::ExpiringSoon {
                buff: summary,
                source: "Coffee".to_string(),
                seconds_remaining: 9,
            },
            BuffEvent::BuffEnded {
                name: "Energized".to_string(),
                source: "Coffee".to_string(),
            },
            BuffEvent::SourceEnded {
                source: "Coffee".to_string(),
            },
        ]
    }

    #[test]
    fn test_all_enabled_forwards_everything() {
        let mut filtered = FilteredDispatcher::new(Vec::new(), &BuffWatchConfig::default());
        filtered.dispatch_all(&sample_events());
        assert_eq!(filtered.inner().len(), 5);
    }

    #[test]
    fn test_each_switch_gates_its_category() {
        let config = BuffWatchConfig {
            show_buff_start_notifications: false,
            ..Default::default()
        };
        let mut filtered = FilteredDispatcher::new(Vec::new(), &config);
        filtered.dispatch_all(&sample_events());
        assert_eq!(filtered.inner().len(), 3);
        assert!(
            filtered
                .inner()
                .iter()
                .all(|e| e.category() != EventCategory::Start)
        );

        let config = BuffWatchConfig {
            show_buff_expiring_warnings: false,
            ..Default::default()
        };
        let mut filtered = FilteredDispatcher::new(Vec::new(), &config);
        filtered.dispatch_all(&sample_events());
        assert_eq!(filtered.inner().len(), 4);

        let config = BuffWatchConfig {
            show_buff_end_notifications: false,
            ..Default::default()
        };
        let mut filtered = FilteredDispatcher::new(Vec::new(), &config);
        filtered.dispatch_all(&sample_events());
        assert_eq!(filtered.into_inner().len(), 3);
    }

    #[test]
    fn test_set_config_updates_switches() {
        let mut filtered = FilteredDispatcher::new(Vec::new(), &BuffWatchConfig::default());
        filtered.set_config(&BuffWatchConfig {
            show_buff_start_notifications: false,
            show_buff_expiring_warnings: false,
            show_buff_end_notifications: false,
            ..Default::default()
        });
        filtered.dispatch_all(&sample_events());
        assert!(filtered.inner().is_empty());
    }

    #[test]
    fn test_queue_renders_and_drains() {
        let mut queue = NotificationQueue::new();
        queue.dispatch_all(&sample_events());
        assert_eq!(queue.len(), 5);

        let notifications = queue.take_notifications();
        assert!(queue.is_empty());
        assert_eq!(notifications[0].message, "Coffee: Energized (Speed +2)");
        assert_eq!(notifications[2].kind, NotificationKind::Warning);
        assert_eq!(notifications[4].kind, NotificationKind::End);
    }

    fn send_first<D: EventDispatcher>(mut dispatcher: D) {
        dispatcher.dispatch(&sample_events()[0]);
    }

    #[test]
    fn test_dispatch_through_mut_ref_and_box() {
        let mut queue = NotificationQueue::new();
        send_first(&mut queue);
        assert_eq!(queue.len(), 1);

        let boxed: Box<dyn EventDispatcher + '_> = Box::new(&mut queue);
        send_first(boxed);
        assert_eq!(queue.len(), 2, "Boxed dispatcher should reach the queue");

        let mut owned = Box::new(NotificationQueue::new());
        send_first(&mut owned);
        send_first(&mut owned);
        assert_eq!(owned.len(), 2);
    }
}
