use serde::{Deserialize, Serialize};

/// A social network a post or calendar event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    Facebook,
    LinkedIn,
    Threads,
    Bluesky,
    YouTube,
    TikTok,
    Pinterest,
}

impl Platform {
    pub const ALL: [Platform; 9] = [
        Self::Twitter,
        Self::Instagram,
        Self::Facebook,
        Self::LinkedIn,
        Self::Threads,
        Self::Bluesky,
        Self::YouTube,
        Self::TikTok,
        Self::Pinterest,
    ];

    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::LinkedIn => "linkedin",
            Self::Threads => "threads",
            Self::Bluesky => "bluesky",
            Self::YouTube => "youtube",
            Self::TikTok => "tiktok",
            Self::Pinterest => "pinterest",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "twitter" => Some(Self::Twitter),
            "instagram" => Some(Self::Instagram),
            "facebook" => Some(Self::Facebook),
            "linkedin" => Some(Self::LinkedIn),
            "threads" => Some(Self::Threads),
            "bluesky" => Some(Self::Bluesky),
            "youtube" => Some(Self::YouTube),
            "tiktok" => Some(Self::TikTok),
            "pinterest" => Some(Self::Pinterest),
            _ => None,
        }
    }

    /// Human-readable name for headers and chip tooltips.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::LinkedIn => "LinkedIn",
            Self::Threads => "Threads",
            Self::Bluesky => "Bluesky",
            Self::YouTube => "YouTube",
            Self::TikTok => "TikTok",
            Self::Pinterest => "Pinterest",
        }
    }
}
