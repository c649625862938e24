//! Buff lifecycle notifications.
//!
//! Given periodic snapshots of a player's active buffs, works out which
//! buffs started, are about to expire, or ended since the last snapshot,
//! and dispatches player-facing notifications for them.

pub mod buff;
pub mod config;
pub mod events;
pub mod monitor;
pub mod notify;
pub mod tracking;

// Re-exports for convenience
pub use buff::{Buff, BuffKey, SourceResolver, StatDeltas};
pub use buffwatch_types::BuffWatchConfig;
pub use events::{BuffEvent, BuffSummary, EventCategory};
pub use monitor::BuffMonitor;
pub use notify::{EventDispatcher, Notification, NotificationKind};
pub use tracking::{Reconciler, StateTracker};
