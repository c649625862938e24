use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use buffwatch_types::formatting::format_remaining;

use crate::buff::NO_VISIBLE_EFFECTS;
use crate::events::{BuffEvent, BuffSummary, EventCategory};

/// Visual category a message is shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Start,
    Warning,
    End,
}

impl From<EventCategory> for NotificationKind {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Start => Self::Start,
            EventCategory::Warning => Self::Warning,
            EventCategory::End => Self::End,
        }
    }
}

/// A rendered message, ready for an on-screen toast or a log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub emitted_at: NaiveDateTime,
}

impl Notification {
    pub fn render(event: &BuffEvent, emitted_at: NaiveDateTime) -> Self {
        Self {
            kind: event.category().into(),
            message: message_for(event),
            emitted_at,
        }
    }
}

/// `"Energized (Speed +2)"`
fn describe_buff(buff: &BuffSummary) -> String {
    let effects = if buff.effects.is_empty() {
        NO_VISIBLE_EFFECTS
    } else {
        buff.effects.as_str()
    };
    format!("{} ({})", buff.name, effects)
}

fn message_for(event: &BuffEvent) -> String {
    match event {
        BuffEvent::SourceStarted { source, buffs } => {
            let list = buffs.iter().map(describe_buff).collect::<Vec<_>>().join("; ");
            format!("{}: {}", source, list)
        }
        BuffEvent::AdditionalBuffFromSource { source, buff } => {
            format!("{} also grants {}", source, describe_buff(buff))
        }
        BuffEvent::ExpiringSoon {
            buff,
            source,
            seconds_remaining,
        } => format!(
            "{} from {} expires in {}",
            buff.name,
            source,
            format_remaining(*seconds_remaining)
        ),
        BuffEvent::BuffEnded { name, source } => {
            format!("{} from {} has worn off", name, source)
        }
        BuffEvent::SourceEnded { source } => format!("Effects from {} have ended", source),
    }
}
