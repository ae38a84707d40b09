use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::storage::{self, Storage, StorageError};

use super::day_key::DayKey;
use super::event::{CalendarEvent, NoteType};

/// Single source of truth for the day→events mapping and the per-day content
/// side map.
///
/// Date-sensitive operations take `today` from the caller; the store never
/// reads the clock itself. Rejected mutations are silent no-ops that return
/// `false`, matching the calendar UI's behavior of simply ignoring bad drops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarEventStore {
    events: HashMap<DayKey, Vec<CalendarEvent>>,
    contents: HashMap<DayKey, String>,
}

impl CalendarEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events for one day, in insertion order. Empty when the day has none.
    pub fn events_for_day(&self, day: DayKey) -> &[CalendarEvent] {
        self.events.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn event(&self, day: DayKey, index: usize) -> Option<&CalendarEvent> {
        self.events.get(&day).and_then(|list| list.get(index))
    }

    /// Days that currently hold at least one event, in no particular order.
    pub fn days(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.events.keys().copied()
    }

    pub fn event_count(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    /// Append an event to a day's list. Rejected when the day is strictly
    /// before `today` (date-only comparison).
    pub fn add_event(&mut self, day: DayKey, event: CalendarEvent, today: NaiveDate) -> bool {
        if day.is_before(today) {
            log::debug!("Rejected add onto past day {day}");
            return false;
        }
        self.events.entry(day).or_default().push(event);
        true
    }

    /// Atomically remove the event at `index` from `source` and append it to
    /// `target`. Rejected for green events, past targets, and out-of-range
    /// indices. An emptied source list drops the source key.
    pub fn move_event(
        &mut self,
        source: DayKey,
        index: usize,
        target: DayKey,
        today: NaiveDate,
    ) -> bool {
        if target.is_before(today) {
            log::debug!("Rejected move onto past day {target}");
            return false;
        }
        let Some(list) = self.events.get_mut(&source) else {
            return false;
        };
        if index >= list.len() {
            return false;
        }
        if list[index].note_type.is_terminal() {
            log::debug!("Rejected move of posted event on {source}");
            return false;
        }
        let event = list.remove(index);
        if list.is_empty() {
            self.events.remove(&source);
        }
        self.events.entry(target).or_default().push(event);
        true
    }

    /// Remove the event at `index`. Rejected for green events. An emptied
    /// list drops the day key.
    pub fn delete_event(&mut self, day: DayKey, index: usize) -> bool {
        let Some(list) = self.events.get_mut(&day) else {
            return false;
        };
        if index >= list.len() {
            return false;
        }
        if list[index].note_type.is_terminal() {
            log::debug!("Rejected delete of posted event on {day}");
            return false;
        }
        list.remove(index);
        if list.is_empty() {
            self.events.remove(&day);
        }
        true
    }

    /// Rewrite a yellow event's posting time in place.
    pub fn update_event_time(&mut self, day: DayKey, index: usize, new_time: NaiveTime) -> bool {
        let Some(event) = self.events.get_mut(&day).and_then(|list| list.get_mut(index)) else {
            return false;
        };
        if event.note_type != NoteType::Yellow {
            return false;
        }
        event.set_time(new_time);
        true
    }

    /// Post body bound to a day's calendar slot, if any.
    pub fn content_for_day(&self, day: DayKey) -> Option<&str> {
        self.contents.get(&day).map(String::as_str)
    }

    /// Bind a post body to a day. An empty body clears the entry.
    pub fn set_content_for_day(&mut self, day: DayKey, content: impl Into<String>) {
        let content = content.into();
        if content.is_empty() {
            self.contents.remove(&day);
        } else {
            self.contents.insert(day, content);
        }
    }

    /// Serialize both maps to their storage keys.
    pub fn persist<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        let events = serde_json::to_string(&self.events)?;
        storage.set_item(storage::CALENDAR_EVENTS_KEY, &events)?;
        let contents = serde_json::to_string(&self.contents)?;
        storage.set_item(storage::CALENDAR_CONTENTS_KEY, &contents)?;
        Ok(())
    }

    /// Rebuild the store from storage. Missing or unparseable entries hydrate
    /// to empty maps; nothing is surfaced to the caller.
    pub fn hydrate<S: Storage + ?Sized>(storage: &S) -> Self {
        Self {
            events: storage::load_or_default(storage, storage::CALENDAR_EVENTS_KEY),
            contents: storage::load_or_default(storage, storage::CALENDAR_CONTENTS_KEY),
        }
    }
}
