//! Glue between the post editor and the calendar: owns the store, the open
//! editor tabs, and the draft/published/failed post lists, and mirrors every
//! mutation to storage.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::core::day_key::DayKey;
use crate::core::event::CalendarEvent;
use crate::core::platform::Platform;
use crate::core::post::{Post, PostStatus, PostTab};
use crate::core::store::CalendarEventStore;
use crate::grid::{self, DragPayload};
use crate::storage::{self, Storage};

/// What the UI should do after a chip's "view" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction {
    /// Green events link out to the published content.
    OpenUrl(String),
    /// Yellow and red events reopen the editor on this tab.
    OpenEditor { tab_id: Uuid },
}

pub struct Workspace<S: Storage> {
    storage: S,
    pub store: CalendarEventStore,
    pub tabs: Vec<PostTab>,
    pub draft_posts: Vec<Post>,
    pub published_posts: Vec<Post>,
    pub failed_posts: Vec<Post>,
}

impl<S: Storage> Workspace<S> {
    /// Load everything persisted under the storage keys. Missing or
    /// unparseable entries come back empty; tabs start fresh each session.
    pub fn load(storage: S) -> Self {
        let store = CalendarEventStore::hydrate(&storage);
        let draft_posts = storage::load_or_default(&storage, storage::DRAFT_POSTS_KEY);
        let published_posts = storage::load_or_default(&storage, storage::PUBLISHED_POSTS_KEY);
        let failed_posts = storage::load_or_default(&storage, storage::FAILED_POSTS_KEY);
        Self {
            storage,
            store,
            tabs: Vec::new(),
            draft_posts,
            published_posts,
            failed_posts,
        }
    }

    /// Select the open tab for a platform, or open a new one.
    pub fn open_tab(&mut self, platform: Platform) -> Uuid {
        if let Some(tab) = self.tabs.iter().find(|t| t.platform == platform) {
            return tab.id;
        }
        let tab = PostTab::new(platform);
        let id = tab.id;
        self.tabs.push(tab);
        id
    }

    pub fn tab(&self, tab_id: Uuid) -> Option<&PostTab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    /// Update a tab's text, mirroring it into the content-by-day map when the
    /// tab is bound to a calendar slot.
    pub fn set_tab_content(&mut self, tab_id: Uuid, content: impl Into<String>) {
        let content = content.into();
        let Some(tab) = self.tabs.iter_mut().find(|t| t.id == tab_id) else {
            return;
        };
        tab.content = content.clone();
        if let Some(day) = tab.bound_day {
            self.store.set_content_for_day(day, content);
            self.persist_calendar();
        }
        self.persist_tabs();
    }

    /// Publish a tab's post right now: a green event lands on today's key at
    /// the current wall clock, the post moves to the published list, and the
    /// tab closes.
    pub fn publish_now(&mut self, tab_id: Uuid, now: NaiveDateTime) -> bool {
        let Some(pos) = self.tabs.iter().position(|t| t.id == tab_id) else {
            return false;
        };
        let tab = self.tabs.remove(pos);
        let post = Post::new(tab.platform, tab.content.clone(), now, PostStatus::Published);
        let url = format!("https://{}.example/p/{}", tab.platform.as_keyword(), post.id);

        let today = DayKey::new(now.date());
        let event = CalendarEvent::posted(tab.platform, now.time(), Some(url));
        self.store.add_event(today, event, now.date());
        self.store.set_content_for_day(today, tab.content);
        self.published_posts.push(post);

        self.persist_calendar();
        self.persist_tabs();
        self.persist_posts();
        true
    }

    /// Schedule a tab's post for a future day and time: a yellow event lands
    /// on the chosen key and the post is saved as a scheduled draft. The tab
    /// stays open, bound to that day.
    pub fn schedule(&mut self, tab_id: Uuid, day: DayKey, time: NaiveTime, today: NaiveDate) -> bool {
        let Some(pos) = self.tabs.iter().position(|t| t.id == tab_id) else {
            return false;
        };
        let event = CalendarEvent::scheduled(self.tabs[pos].platform, time);
        if !self.store.add_event(day, event, today) {
            return false;
        }
        let tab = &mut self.tabs[pos];
        tab.bound_day = Some(day);
        self.store.set_content_for_day(day, tab.content.clone());
        self.draft_posts.push(Post::new(
            tab.platform,
            tab.content.clone(),
            day.date().and_time(time),
            PostStatus::Scheduled,
        ));

        self.persist_calendar();
        self.persist_tabs();
        self.persist_posts();
        true
    }

    /// Resolve a chip's "view" action. Green events yield their external URL;
    /// the rest select or open an editor tab for the platform and load the
    /// day's bound content into it.
    pub fn open_event(&mut self, day: DayKey, index: usize) -> Option<EventAction> {
        let event = self.store.event(day, index)?.clone();
        if event.note_type.is_terminal() {
            return event.url.map(EventAction::OpenUrl);
        }
        let content = self
            .store
            .content_for_day(day)
            .unwrap_or_default()
            .to_string();
        let tab_id = self.open_tab(event.platform);
        if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == tab_id) {
            tab.content = content;
            tab.bound_day = Some(day);
        }
        self.persist_tabs();
        Some(EventAction::OpenEditor { tab_id })
    }

    /// Delete a non-green event from the calendar.
    pub fn delete_event(&mut self, day: DayKey, index: usize) -> bool {
        if !self.store.delete_event(day, index) {
            return false;
        }
        self.persist_calendar();
        true
    }

    /// Route a drag-and-drop onto a day cell through the store.
    pub fn drop_on_cell(&mut self, payload: DragPayload, target: DayKey, today: NaiveDate) -> bool {
        if !grid::drop_on_cell(&mut self.store, payload, target, today) {
            return false;
        }
        self.persist_calendar();
        true
    }

    /// Move a published post to the failed list with a canned reason. The
    /// caller decides when the simulated delivery "fails".
    pub fn mark_failed(&mut self, post_id: Uuid, reason: impl Into<String>) -> bool {
        let Some(pos) = self.published_posts.iter().position(|p| p.id == post_id) else {
            return false;
        };
        let mut post = self.published_posts.remove(pos);
        post.status = PostStatus::Failed;
        post.error = Some(reason.into());
        self.failed_posts.push(post);
        self.persist_posts();
        true
    }

    /// Republish a failed post: back to the published list with a fresh green
    /// event on today's key.
    pub fn retry(&mut self, post_id: Uuid, now: NaiveDateTime) -> bool {
        let Some(pos) = self.failed_posts.iter().position(|p| p.id == post_id) else {
            return false;
        };
        let mut post = self.failed_posts.remove(pos);
        post.status = PostStatus::Published;
        post.error = None;
        post.timestamp = now;

        let url = format!("https://{}.example/p/{}", post.platform.as_keyword(), post.id);
        let event = CalendarEvent::posted(post.platform, now.time(), Some(url));
        self.store.add_event(DayKey::new(now.date()), event, now.date());
        self.published_posts.push(post);

        self.persist_calendar();
        self.persist_posts();
        true
    }

    fn persist_calendar(&mut self) {
        if let Err(e) = self.store.persist(&mut self.storage) {
            log::error!("Failed to persist calendar: {e}");
        }
    }

    fn persist_tabs(&mut self) {
        let contents: HashMap<Uuid, String> = self
            .tabs
            .iter()
            .map(|t| (t.id, t.content.clone()))
            .collect();
        self.persist_value(storage::POST_CONTENTS_KEY, &contents);
    }

    fn persist_posts(&mut self) {
        let drafts = self.draft_posts.clone();
        self.persist_value(storage::DRAFT_POSTS_KEY, &drafts);
        let published = self.published_posts.clone();
        self.persist_value(storage::PUBLISHED_POSTS_KEY, &published);
        let failed = self.failed_posts.clone();
        self.persist_value(storage::FAILED_POSTS_KEY, &failed);
    }

    fn persist_value<T: serde::Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                if let Err(e) = self.storage.set_item(key, &json) {
                    log::error!("Failed to persist {key}: {e}");
                }
            }
            Err(e) => log::error!("Failed to serialize {key}: {e}"),
        }
    }
}
