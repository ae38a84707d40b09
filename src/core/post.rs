use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::day_key::DayKey;
use super::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Failed,
}

/// A post record in the draft/published/failed list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub platform: Platform,
    pub content: String,
    pub timestamp: NaiveDateTime,
    pub status: PostStatus,
    /// Canned failure reason; failed posts only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Post {
    pub fn new(
        platform: Platform,
        content: impl Into<String>,
        timestamp: NaiveDateTime,
        status: PostStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            platform,
            content: content.into(),
            timestamp,
            status,
            error: None,
        }
    }
}

/// An open tab in the post editor.
///
/// Tabs are session state; only their text is mirrored to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTab {
    pub id: Uuid,
    pub platform: Platform,
    pub content: String,
    /// Day whose calendar slot this tab's text is bound to, once scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_day: Option<DayKey>,
}

impl PostTab {
    pub fn new(platform: Platform) -> Self {
        Self {
            id: Uuid::new_v4(),
            platform,
            content: String::new(),
            bound_day: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn new_post_has_no_error() {
        let at = NaiveDate::from_ymd_opt(2026, 9, 14)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        let post = Post::new(Platform::Instagram, "hello", at, PostStatus::Published);
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.error, None);
    }

    #[test]
    fn fresh_tab_is_unbound() {
        let tab = PostTab::new(Platform::Twitter);
        assert!(tab.content.is_empty());
        assert_eq!(tab.bound_day, None);
    }
}
