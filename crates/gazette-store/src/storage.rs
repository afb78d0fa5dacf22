use gazette_types::{Channel, News, Principal, User};
use tracing::info;

use crate::map::{MemoryId, StableMap};

/// The three persisted namespaces the service operates on.
///
/// No operation spans namespaces transactionally; every caller sequences
/// its own reads and writes, relying on the host running one invocation
/// at a time.
#[derive(Debug, Clone)]
pub struct Storage {
    channels: StableMap<String, Channel>,
    users: StableMap<String, User>,
    /// Reserved namespace. No current operation reads or writes it; it is
    /// kept so the on-disk layout stays stable if news items ever move out
    /// of their channels.
    #[allow(dead_code)]
    news: StableMap<Principal, News>,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage {
    pub fn new() -> Self {
        let storage = Self {
            channels: StableMap::new(MemoryId(0)),
            users: StableMap::new(MemoryId(1)),
            news: StableMap::new(MemoryId(2)),
        };
        info!("storage opened");
        storage
    }

    // -- Users --

    pub fn user(&self, username: &str) -> Option<User> {
        self.users.get(&username.to_string())
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.users.contains_key(&username.to_string())
    }

    pub fn insert_user(&mut self, user: User) -> Option<User> {
        self.users.insert(user.username.clone(), user)
    }

    /// Full scan for the user whose principal matches `id` by canonical
    /// text. Used by channel deletion to clean up the creator's
    /// `channels_created` list.
    pub fn find_user_by_id(&self, id: &Principal) -> Option<User> {
        let wanted = id.to_text();
        self.users
            .iter()
            .map(|(_, user)| user)
            .find(|u| u.id.to_text() == wanted)
            .cloned()
    }

    // -- Channels --

    pub fn channel(&self, name: &str) -> Option<Channel> {
        self.channels.get(&name.to_string())
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.contains_key(&name.to_string())
    }

    pub fn insert_channel(&mut self, channel: Channel) -> Option<Channel> {
        self.channels.insert(channel.name.clone(), channel)
    }

    pub fn remove_channel(&mut self, name: &str) -> Option<Channel> {
        self.channels.remove(&name.to_string())
    }

    /// All channels in name order.
    pub fn channels(&self) -> Vec<Channel> {
        self.channels.values()
    }
}
