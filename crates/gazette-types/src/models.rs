use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of a caller or a generated entity.
///
/// Two principals are considered the same identity when their canonical
/// textual forms match; ownership checks in the service layer compare
/// `to_text()` output, never raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(Uuid);

impl Principal {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Fresh random principal. Collision probability is negligible; no
    /// uniqueness check against stored ids is performed.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Canonical textual form, the representation used for identity
    /// comparisons.
    pub fn to_text(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered account. Keyed by username in the user store; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Principal,
    pub username: String,
    /// Names of channels this user created, in creation order.
    pub channels_created: Vec<String>,
    /// Host timestamp (nanoseconds) at registration.
    pub joined_at: u64,
}

/// A named channel. Keyed by name in the channel store; owns its news items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub owner: Principal,
    pub news: Vec<News>,
    /// Usernames following this channel, insertion order, no duplicates.
    pub followers: Vec<String>,
}

impl Channel {
    pub fn is_follower(&self, username: &str) -> bool {
        self.followers.iter().any(|f| f == username)
    }

    pub fn news_mut(&mut self, news_id: &Principal) -> Option<&mut News> {
        let wanted = news_id.to_text();
        self.news.iter_mut().find(|n| n.id.to_text() == wanted)
    }
}

/// A news item posted into a channel. Embedded in exactly one channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: Principal,
    pub title: String,
    pub description: String,
    pub replies: Vec<Reply>,
}

/// A follower's reply to a news item. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub by: Principal,
    pub news_id: Principal,
    pub text: String,
}
