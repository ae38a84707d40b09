//! Canned assistant replies for the workspace chat panel. Pure keyword
//! lookup over a small rule table; no state and no bearing on the calendar
//! model.

use crate::core::platform::Platform;

/// A draft the assistant offers to open in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSuggestion {
    pub platform: Platform,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub suggestion: Option<DraftSuggestion>,
}

struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
    platform: Option<Platform>,
    draft: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["tweet", "twitter"],
        reply: "Here's a tweet draft for you. Want me to drop it into the editor?",
        platform: Some(Platform::Twitter),
        draft: "Big things are coming. Stay tuned 👀",
    },
    Rule {
        keywords: &["instagram", "photo", "reel"],
        reply: "Drafted an Instagram caption. Open it in the editor to tweak the hashtags.",
        platform: Some(Platform::Instagram),
        draft: "Behind the scenes of what we've been building ✨ #buildinpublic",
    },
    Rule {
        keywords: &["linkedin", "professional"],
        reply: "Here's a LinkedIn angle on that. It reads best with a personal hook up top.",
        platform: Some(Platform::LinkedIn),
        draft: "Three lessons from our last launch, in no particular order:",
    },
    Rule {
        keywords: &["schedule", "when", "best time"],
        reply: "Drag a platform icon onto a calendar day to create a slot, then pick a time from the publish dialog.",
        platform: None,
        draft: "",
    },
    Rule {
        keywords: &["help", "how do i"],
        reply: "You can draft posts in the editor tabs, publish them right away, or schedule them onto the calendar. Ask me for a draft for any platform.",
        platform: None,
        draft: "",
    },
];

const FALLBACK: &str =
    "I can draft posts for your platforms or explain scheduling. Try asking for a tweet.";

/// Resolve a user message against the rule table. First matching rule wins.
pub fn respond(user_text: &str) -> ChatReply {
    let lowered = user_text.to_lowercase();
    for rule in RULES {
        if rule.keywords.iter().any(|k| lowered.contains(k)) {
            return ChatReply {
                text: rule.reply.to_string(),
                suggestion: rule.platform.map(|platform| DraftSuggestion {
                    platform,
                    content: rule.draft.to_string(),
                }),
            };
        }
    }
    ChatReply {
        text: FALLBACK.to_string(),
        suggestion: None,
    }
}
