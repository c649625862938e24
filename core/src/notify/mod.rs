//! Notification dispatch
//!
//! Turns [`BuffEvent`](crate::events::BuffEvent)s into player-facing
//! messages. The [`EventDispatcher`] trait is the seam toward the
//! presentation layer; [`FilteredDispatcher`] applies the per-category
//! notification switches in front of any dispatcher.

mod dispatcher;
mod notification;

pub use dispatcher::{EventDispatcher, FilteredDispatcher, LogDispatcher, NotificationQueue};
pub use notification::{Notification, NotificationKind};
