use crate::buff::{Buff, BuffKey, describe};

/// Snapshot of a single buff at the moment an event about it was emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuffSummary {
    pub id: String,
    pub name: String,
    /// Stat summary such as `"Speed +2"`; empty when nothing is modified
    pub effects: String,
    pub seconds_remaining: u64,
}

impl BuffSummary {
    pub fn from_buff(buff: &Buff) -> Self {
        Self {
            id: buff.id.clone(),
            name: buff.display_name.clone(),
            effects: describe(&buff.effects),
            seconds_remaining: buff.seconds_remaining(),
        }
    }
}

/// Lifecycle transitions detected between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuffEvent {
    /// A source with nothing previously active started granting buffs.
    /// `buffs` holds every buff it granted in this snapshot, sorted by name.
    SourceStarted {
        source: String,
        buffs: Vec<BuffSummary>,
    },

    /// An already-active source granted one more buff.
    AdditionalBuffFromSource { source: String, buff: BuffSummary },

    /// A buff crossed the warning threshold. Fires once per continuous lifetime.
    ExpiringSoon {
        buff: BuffSummary,
        source: String,
        seconds_remaining: u64,
    },

    /// A buff ended while other buffs from its source are still active.
    BuffEnded { name: String, source: String },

    /// The last buffs from a source ended.
    SourceEnded { source: String },
}

/// Visual category of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Start,
    Warning,
    End,
}

impl BuffEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            Self::SourceStarted { .. } | Self::AdditionalBuffFromSource { .. } => {
                EventCategory::Start
            }
            Self::ExpiringSoon { .. } => EventCategory::Warning,
            Self::BuffEnded { .. } | Self::SourceEnded { .. } => EventCategory::End,
        }
    }

    /// Source label this event is about.
    pub fn source(&self) -> &str {
        match self {
            Self::SourceStarted { source, .. }
            | Self::AdditionalBuffFromSource { source, .. }
            | Self::ExpiringSoon { source, .. }
            | Self::BuffEnded { source, .. }
            | Self::SourceEnded { source } => source,
        }
    }

    /// Build the end event for a key.
    pub(crate) fn ended(key: &BuffKey, last_of_source: bool) -> Self {
        if last_of_source {
            Self::SourceEnded {
                source: key.source.clone(),
            }
        } else {
            Self::BuffEnded {
                name: key.name.clone(),
                source: key.source.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buff::StatDeltas;

    #[test]
    fn test_summary_from_buff() {
        let buff = Buff {
            id: "17".to_string(),
            display_name: "Energized".to_string(),
            source: Some("Coffee".to_string()),
            remaining_ms: 20_500,
            effects: StatDeltas {
                speed: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        let summary = BuffSummary::from_buff(&buff);
        assert_eq!(summary.id, "17");
        assert_eq!(summary.name, "Energized");
        assert_eq!(summary.effects, "Speed +2");
        assert_eq!(summary.seconds_remaining, 20);
    }

    #[test]
    fn test_categories() {
        let ended = BuffEvent::SourceEnded {
            source: "Coffee".to_string(),
        };
        assert_eq!(ended.category(), EventCategory::End);
        assert_eq!(ended.source(), "Coffee");

        let started = BuffEvent::SourceStarted {
            source: "Coffee".to_string(),
            buffs: vec![],
        };
        assert_eq!(started.category(), EventCategory::Start);
    }

    #[test]
    fn test_ended_picks_variant() {
        let key = BuffKey::new("Energized", "Coffee");
        assert_eq!(
            BuffEvent::ended(&key, true),
            BuffEvent::SourceEnded {
                source: "Coffee".to_string()
            }
        );
        assert_eq!(
            BuffEvent::ended(&key, false),
            BuffEvent::BuffEnded {
                name: "Energized".to_string(),
                source: "Coffee".to_string()
            }
        );
    }
}
