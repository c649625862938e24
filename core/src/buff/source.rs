//! Source label resolution

use super::Buff;

/// Label used when a buff carries no usable source text.
pub const UNKNOWN_SOURCE: &str = "unknown source";

/// Maps a buff to the display label of whatever granted it.
///
/// Fallback order, first non-blank wins:
/// 1. the buff's own source label
/// 2. its description, when `use_description` is set
/// 3. [`UNKNOWN_SOURCE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceResolver {
    pub use_description: bool,
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self {
            use_description: true,
        }
    }
}

impl SourceResolver {
    pub fn new(use_description: bool) -> Self {
        Self { use_description }
    }

    pub fn resolve(&self, buff: &Buff) -> String {
        let description = if self.use_description {
            buff.description.as_deref()
        } else {
            None
        };

        [buff.source.as_deref(), description]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SOURCE)
            .to_string()
    }
}
