//! Shared types for buffwatch.
//!
//! Holds the user-facing configuration (serialized with the same key names
//! the settings file has always used) and the text formatting helpers shared
//! by the notification layer and the replay tool.

pub mod formatting;

use serde::{Deserialize, Serialize};

/// Smallest accepted expiry warning threshold, in seconds.
pub const MIN_WARNING_THRESHOLD_SECS: u32 = 1;
/// Largest accepted expiry warning threshold, in seconds.
pub const MAX_WARNING_THRESHOLD_SECS: u32 = 60;

fn default_true() -> bool {
    true
}

fn default_warning_threshold() -> u32 {
    10
}

fn default_sample_interval() -> u32 {
    30
}

/// Notification settings.
///
/// Every field falls back to its default when missing, so a partially
/// written settings file still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuffWatchConfig {
    /// Remaining seconds at or below which an expiry warning fires
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold_seconds: u32,

    // ─── Notification switches ──────────────────────────────────────────────
    #[serde(default = "default_true")]
    pub show_buff_start_notifications: bool,

    #[serde(default = "default_true")]
    pub show_buff_expiring_warnings: bool,

    #[serde(default = "default_true")]
    pub show_buff_end_notifications: bool,

    // ─── Tracking ───────────────────────────────────────────────────────────
    /// Fall back to the buff description when a buff has no source label
    #[serde(default = "default_true")]
    pub use_description_as_source: bool,

    /// Host update ticks between snapshots (30 ticks is roughly half a second)
    #[serde(default = "default_sample_interval")]
    pub sample_interval_ticks: u32,
}

impl Default for BuffWatchConfig {
    fn default() -> Self {
        Self {
            warning_threshold_seconds: default_warning_threshold(),
            show_buff_start_notifications: true,
            show_buff_expiring_warnings: true,
            show_buff_end_notifications: true,
            use_description_as_source: true,
            sample_interval_ticks: default_sample_interval(),
        }
    }
}

impl BuffWatchConfig {
    /// Copy of this config with out-of-range values pulled back into range.
    pub fn clamped(&self) -> Self {
        Self {
            warning_threshold_seconds: self
                .warning_threshold_seconds
                .clamp(MIN_WARNING_THRESHOLD_SECS, MAX_WARNING_THRESHOLD_SECS),
            sample_interval_ticks: self.sample_interval_ticks.max(1),
            ..self.clone()
        }
    }
}
