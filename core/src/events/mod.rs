//! Buff lifecycle events
//!
//! Events are emitted by the [`Reconciler`](crate::tracking::Reconciler) and
//! consumed by an [`EventDispatcher`](crate::notify::EventDispatcher). Each
//! variant carries everything needed to render a message and pick a visual
//! category without looking back at tracker state.

mod event;

pub use event::{BuffEvent, BuffSummary, EventCategory};
