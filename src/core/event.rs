use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::platform::Platform;
use super::timefmt;

/// Lifecycle tag of a calendar event.
///
/// Green is terminal: the post went out and the event can no longer be moved,
/// deleted, or re-timed. Yellow and red remain draggable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// Published.
    Green,
    /// Scheduled for a future time.
    Yellow,
    /// Dropped onto the calendar but not scheduled yet.
    Red,
}

impl NoteType {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Green)
    }

    pub fn is_draggable(&self) -> bool {
        !self.is_terminal()
    }
}

/// One entry in a day's event list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub platform: Platform,
    /// Intended or actual posting time, stored as a 24-hour wall clock.
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    /// Display label kept alongside the note type for the list views.
    pub status: String,
    pub note_type: NoteType,
    /// Link to the published content; green events only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CalendarEvent {
    /// A green event for a post that just went out.
    pub fn posted(platform: Platform, time: NaiveTime, url: Option<String>) -> Self {
        Self {
            platform,
            time,
            status: format!("posted {}", timefmt::to_12h(time)),
            note_type: NoteType::Green,
            url,
        }
    }

    /// A yellow event for a post scheduled at a user-picked time.
    pub fn scheduled(platform: Platform, time: NaiveTime) -> Self {
        Self {
            platform,
            time,
            status: format!("scheduled {}", timefmt::to_12h(time)),
            note_type: NoteType::Yellow,
            url: None,
        }
    }

    /// A red event for a platform icon dropped onto a day with no time picked.
    pub fn draft(platform: Platform) -> Self {
        Self {
            platform,
            time: NaiveTime::MIN,
            status: "not scheduled".to_string(),
            note_type: NoteType::Red,
            url: None,
        }
    }

    /// Rewrite the posting time, keeping the status label in step.
    pub fn set_time(&mut self, time: NaiveTime) {
        self.time = time;
        if self.note_type == NoteType::Yellow {
            self.status = format!("scheduled {}", timefmt::to_12h(time));
        }
    }
}

/// `HH:MM` wire form for event times.
mod hhmm {
    use chrono::NaiveTime;
    use serde::de;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::core::timefmt;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&timefmt::to_24h(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        timefmt::parse_24h(&s).ok_or_else(|| de::Error::custom(format!("invalid time: {s}")))
    }
}
