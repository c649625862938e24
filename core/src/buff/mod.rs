//! Buff data model
//!
//! A [`Buff`] is one entry of a host snapshot: a timed status effect with
//! numeric stat modifiers. Buffs are identified for tracking purposes by a
//! [`BuffKey`], the (display name, resolved source) pair.

mod effects;
mod source;

pub use effects::{NO_VISIBLE_EFFECTS, STAT_FIELDS, describe};
pub use source::{SourceResolver, UNKNOWN_SOURCE};

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Signed stat modifiers carried by a buff.
///
/// Fixed shape: missing, null or malformed fields deserialize as zero, and
/// zero deltas never show up in a description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StatDeltas {
    #[serde(deserialize_with = "lenient_delta")]
    pub farming: i32,
    #[serde(deserialize_with = "lenient_delta")]
    pub fishing: i32,
    #[serde(deserialize_with = "lenient_delta")]
    pub mining: i32,
    #[serde(deserialize_with = "lenient_delta")]
    pub luck: i32,
    #[serde(deserialize_with = "lenient_delta")]
    pub foraging: i32,
    #[serde(deserialize_with = "lenient_delta")]
    pub max_energy: i32,
    #[serde(deserialize_with = "lenient_delta")]
    pub magnetism: i32,
    #[serde(deserialize_with = "lenient_delta")]
    pub speed: i32,
    #[serde(deserialize_with = "lenient_delta")]
    pub defense: i32,
    #[serde(deserialize_with = "lenient_delta")]
    pub attack: i32,
}

/// Any stat value the host may hand over. Only in-range integers count.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDelta {
    Int(i64),
    Other(IgnoredAny),
}

/// Read a stat delta, treating null, non-integer or out-of-range values as 0.
fn lenient_delta<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawDelta>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawDelta::Int(value)) => i32::try_from(value).unwrap_or(0),
        Some(RawDelta::Other(_)) | None => 0,
    })
}

impl StatDeltas {
    /// True when no stat is modified.
    pub fn is_empty(&self) -> bool {
        STAT_FIELDS.iter().all(|(_, get)| get(self) == 0)
    }
}

/// One active buff as reported by the host for a single sampling instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    /// Opaque host identifier
    #[serde(default)]
    pub id: String,

    /// Display name; buffs without one are never tracked
    #[serde(default)]
    pub display_name: String,

    /// Label of the item or action that granted the buff
    #[serde(default)]
    pub source: Option<String>,

    /// Free-form description, used as a source fallback
    #[serde(default)]
    pub description: Option<String>,

    /// Remaining duration; non-positive values mark inert/instant buffs
    #[serde(default)]
    pub remaining_ms: i64,

    #[serde(default)]
    pub effects: StatDeltas,
}

impl Buff {
    /// Whether this snapshot entry participates in tracking at all.
    pub fn is_trackable(&self) -> bool {
        !self.display_name.is_empty() && self.remaining_ms > 0
    }

    /// Whole seconds remaining (truncating).
    pub fn seconds_remaining(&self) -> u64 {
        u64::try_from(self.remaining_ms / 1000).unwrap_or(0)
    }
}

/// Tracking identity of a buff: display name plus resolved source.
///
/// Ordered by name first, then source, which is also the order events are
/// emitted in when several happen in the same reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuffKey {
    pub name: String,
    pub source: String,
}

impl BuffKey {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

impl std::fmt::Display for BuffKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.source)
    }
}
