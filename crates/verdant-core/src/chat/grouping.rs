//! Relative-recency grouping of saved chats for display.
//!
//! Buckets are computed from whole days elapsed since a chat's timestamp.

use std::fmt;

use serde::Serialize;
use verdant_types::chat::SavedChat;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Display bucket for a saved chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecencyGroup {
    Today,
    Yesterday,
    #[serde(rename = "Last 3 days")]
    Last3Days,
    #[serde(rename = "Last 7 days")]
    Last7Days,
    #[serde(rename = "Last 30 days")]
    Last30Days,
    Older,
}

impl RecencyGroup {
    /// Bucket for a chat that is `days` whole days old.
    ///
    /// Negative ages (clock skew) count as today.
    pub fn from_age_days(days: i64) -> Self {
        match days {
            i64::MIN..=0 => RecencyGroup::Today,
            1 => RecencyGroup::Yesterday,
            2..=3 => RecencyGroup::Last3Days,
            4..=7 => RecencyGroup::Last7Days,
            8..=30 => RecencyGroup::Last30Days,
            _ => RecencyGroup::Older,
        }
    }

    /// Bucket for a timestamp relative to `now_ms` (both epoch milliseconds).
    pub fn for_timestamp(timestamp_ms: i64, now_ms: i64) -> Self {
        let days = now_ms.saturating_sub(timestamp_ms).div_euclid(MILLIS_PER_DAY);
        Self::from_age_days(days)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecencyGroup::Today => "Today",
            RecencyGroup::Yesterday => "Yesterday",
            RecencyGroup::Last3Days => "Last 3 days",
            RecencyGroup::Last7Days => "Last 7 days",
            RecencyGroup::Last30Days => "Last 30 days",
            RecencyGroup::Older => "Older",
        }
    }
}

impl fmt::Display for RecencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Saved chats sharing one recency bucket.
#[derive(Debug, Clone, Serialize)]
pub struct ChatGroup<'a> {
    pub group: RecencyGroup,
    pub chats: Vec<&'a SavedChat>,
}

/// Bucket `chats` by recency.
///
/// Buckets appear in order of first occurrence and keep the input order of
/// their chats, so a newest-first list yields newest-first groups.
pub fn group_by_recency(chats: &[SavedChat], now_ms: i64) -> Vec<ChatGroup<'_>> {
    let mut groups: Vec<ChatGroup<'_>> = Vec::new();
    for chat in chats {
        let group = RecencyGroup::for_timestamp(chat.timestamp, now_ms);
        match groups.iter_mut().find(|g| g.group == group) {
            Some(existing) => existing.chats.push(chat),
            None => groups.push(ChatGroup {
                group,
                chats: vec![chat],
            }),
        }
    }
    groups
}
