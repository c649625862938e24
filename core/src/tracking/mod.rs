//! Buff state reconciliation
//!
//! This module provides:
//! - **StateTracker**: what was active as of the last reconciliation
//! - **Reconciler**: diffs a fresh snapshot against that state and emits
//!   lifecycle events
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Snapshot (from the host)                     │
//! │   "Energized from Coffee, 9.0s left, Speed +2"                  │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                   Reconciler::reconcile
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 StateTracker (committed state)                   │
//! │   active keys -> seconds, source -> names, warned keys          │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                    Vec<BuffEvent> -> dispatcher
//! ```
//!
//! Per key the lifecycle is `Absent -> Active -> Active+Warned -> Absent`.
//! A key first seen below the warning threshold takes both of the first two
//! steps in the same reconciliation, start first.

mod reconciler;
mod state;


pub use reconciler::Reconciler;
pub use state::StateTracker;
