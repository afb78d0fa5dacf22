use gazette_store::Storage;
use gazette_types::api::{
    ChannelRequest, DeleteChannelRequest, GetNewsRequest, PostNewsRequest, RegisterUserRequest,
    ReplyRequest,
};
use gazette_types::{Channel, HostEnv, News, Reply, User};
use tracing::{info, warn};

use crate::error::{ServiceError, ServiceResult};

/// The domain operations, validated and applied against [`Storage`].
///
/// Each operation receives the host capability for the current invocation
/// explicitly, so caller identity, time, and id generation stay injectable.
/// Validation fully precedes mutation: no store write happens on any error
/// path.
#[derive(Debug, Default)]
pub struct CommunityService {
    storage: Storage,
}

impl CommunityService {
    pub fn new() -> Self {
        Self {
            storage: Storage::new(),
        }
    }

    /// Rehydrate from host-restored storage.
    pub fn with_storage(storage: Storage) -> Self {
        Self { storage }
    }

    /// Current state, e.g. for a host snapshotting between calls.
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    // -- Users --

    pub fn register_user(
        &mut self,
        host: &dyn HostEnv,
        req: RegisterUserRequest,
    ) -> ServiceResult<String> {
        if blank(&req.username) {
            return Err(ServiceError::UsernameRequired(
                "a username must be provided".into(),
            ));
        }
        if self.storage.has_user(&req.username) {
            warn!(username = %req.username, "registration rejected, username taken");
            return Err(ServiceError::UsernameTaken(format!(
                "username {} is already taken",
                req.username
            )));
        }

        let user = User {
            id: host.caller(),
            username: req.username.clone(),
            channels_created: vec![],
            joined_at: host.now(),
        };
        self.storage.insert_user(user);

        info!(username = %req.username, "user registered");
        Ok(format!("user {} registered", req.username))
    }

    // -- Channels --

    pub fn create_channel(
        &mut self,
        host: &dyn HostEnv,
        req: ChannelRequest,
    ) -> ServiceResult<String> {
        if blank(&req.channel_name) || blank(&req.username) {
            return Err(ServiceError::CredentialsMissing(
                "channel name and username are required".into(),
            ));
        }
        if self.storage.has_channel(&req.channel_name) {
            return Err(ServiceError::ChannelAlreadyExists(format!(
                "channel {} already exists",
                req.channel_name
            )));
        }
        let Some(mut creator) = self.storage.user(&req.username) else {
            return Err(ServiceError::UserDoesNotExist(format!(
                "user {} is not registered",
                req.username
            )));
        };

        self.storage.insert_channel(Channel {
            name: req.channel_name.clone(),
            owner: host.caller(),
            news: vec![],
            followers: vec![],
        });

        // Keep the denormalized ownership list in step with the channel
        // store.
        creator.channels_created.push(req.channel_name.clone());
        self.storage.insert_user(creator);

        info!(channel = %req.channel_name, creator = %req.username, "channel created");
        Ok(format!("channel {} created", req.channel_name))
    }

    /// All channels, in name order.
    pub fn all_channels(&self) -> Vec<Channel> {
        self.storage.channels()
    }

    pub fn follow_channel(
        &mut self,
        _host: &dyn HostEnv,
        req: ChannelRequest,
    ) -> ServiceResult<String> {
        if blank(&req.channel_name) || blank(&req.username) {
            return Err(ServiceError::CredentialsMissing(
                "channel name and username are required".into(),
            ));
        }
        if !self.storage.has_user(&req.username) {
            return Err(ServiceError::UserDoesNotExist(format!(
                "user {} is not registered",
                req.username
            )));
        }
        let Some(mut channel) = self.storage.channel(&req.channel_name) else {
            return Err(ServiceError::ChannelDoesNotExist(format!(
                "channel {} does not exist",
                req.channel_name
            )));
        };
        if channel.is_follower(&req.username) {
            return Err(ServiceError::AlreadyFollowing(format!(
                "{} already follows {}",
                req.username, req.channel_name
            )));
        }

        channel.followers.push(req.username.clone());
        self.storage.insert_channel(channel);

        info!(channel = %req.channel_name, follower = %req.username, "channel followed");
        Ok(format!("now following {}", req.channel_name))
    }

    pub fn unfollow_channel(
        &mut self,
        _host: &dyn HostEnv,
        req: ChannelRequest,
    ) -> ServiceResult<String> {
        if blank(&req.channel_name) || blank(&req.username) {
            return Err(ServiceError::CredentialsMissing(
                "channel name and username are required".into(),
            ));
        }
        if !self.storage.has_user(&req.username) {
            return Err(ServiceError::UserDoesNotExist(format!(
                "user {} is not registered",
                req.username
            )));
        }
        let Some(mut channel) = self.storage.channel(&req.channel_name) else {
            return Err(ServiceError::ChannelDoesNotExist(format!(
                "channel {} does not exist",
                req.channel_name
            )));
        };
        if !channel.is_follower(&req.username) {
            return Err(ServiceError::NotAFollower(format!(
                "{} does not follow {}",
                req.username, req.channel_name
            )));
        }

        channel.followers.retain(|f| f != &req.username);
        self.storage.insert_channel(channel);

        info!(channel = %req.channel_name, follower = %req.username, "channel unfollowed");
        Ok(format!("unfollowed {}", req.channel_name))
    }

    pub fn delete_channel(
        &mut self,
        _host: &dyn HostEnv,
        req: DeleteChannelRequest,
    ) -> ServiceResult<String> {
        // The owner field is a typed principal and has no empty state, so
        // only the channel name gets the blank guard.
        if blank(&req.channel_name) {
            return Err(ServiceError::CredentialsMissing(
                "channel name is required".into(),
            ));
        }
        let Some(channel) = self.storage.channel(&req.channel_name) else {
            return Err(ServiceError::ChannelDoesNotExist(format!(
                "channel {} does not exist",
                req.channel_name
            )));
        };
        if channel.owner.to_text() != req.owner.to_text() {
            warn!(channel = %req.channel_name, "delete rejected, caller is not the owner");
            return Err(ServiceError::OnlyOwnerCanDelete(
                "only the owner can delete the channel".into(),
            ));
        }

        self.storage.remove_channel(&req.channel_name);

        // Strip the name from the creator's channels_created. The creator
        // is found by scanning users for the stored owner principal; a
        // missing match leaves the channel store change in place.
        if let Some(mut creator) = self.storage.find_user_by_id(&channel.owner) {
            creator.channels_created.retain(|c| c != &req.channel_name);
            self.storage.insert_user(creator);
        }

        info!(channel = %req.channel_name, "channel deleted");
        Ok(format!("channel {} deleted", req.channel_name))
    }

    // -- News --

    pub fn post_news(&mut self, host: &dyn HostEnv, req: PostNewsRequest) -> ServiceResult<String> {
        if blank(&req.title) || blank(&req.description) || blank(&req.channel_name) {
            return Err(ServiceError::CredentialsMissing(
                "title, description and channel name are required".into(),
            ));
        }
        let Some(mut channel) = self.storage.channel(&req.channel_name) else {
            return Err(ServiceError::ChannelDoesNotExist(format!(
                "channel {} does not exist",
                req.channel_name
            )));
        };
        if channel.owner.to_text() != req.owner.to_text() {
            warn!(channel = %req.channel_name, "post rejected, caller is not the owner");
            return Err(ServiceError::OnlyOwnerCanPost(
                "only the owner can post news to the channel".into(),
            ));
        }

        let id = host.generate_id();
        channel.news.push(News {
            id: id.clone(),
            title: req.title,
            description: req.description,
            replies: vec![],
        });
        self.storage.insert_channel(channel);

        info!(channel = %req.channel_name, news_id = %id, "news posted");
        Ok(format!("news {} posted to {}", id, req.channel_name))
    }

    /// News of a channel. A channel that does not exist yields an empty
    /// list rather than an error.
    pub fn news_for(&self, req: GetNewsRequest) -> ServiceResult<Vec<News>> {
        if blank(&req.channel_name) {
            return Err(ServiceError::CredentialsMissing(
                "channel name is required".into(),
            ));
        }
        Ok(self
            .storage
            .channel(&req.channel_name)
            .map(|c| c.news)
            .unwrap_or_default())
    }

    pub fn reply_to_news(
        &mut self,
        host: &dyn HostEnv,
        req: ReplyRequest,
    ) -> ServiceResult<String> {
        if blank(&req.channel_name) || blank(&req.username) || blank(&req.text) {
            return Err(ServiceError::CredentialsMissing(
                "channel name, username and reply text are required".into(),
            ));
        }
        let Some(mut channel) = self.storage.channel(&req.channel_name) else {
            return Err(ServiceError::ChannelDoesNotExist(format!(
                "channel {} does not exist",
                req.channel_name
            )));
        };
        if !channel.is_follower(&req.username) {
            return Err(ServiceError::OnlyFollowersCanReply(format!(
                "{} does not follow {}",
                req.username, req.channel_name
            )));
        }
        let Some(news) = channel.news_mut(&req.news_id) else {
            return Err(ServiceError::UnknownNewsId(format!(
                "no news with id {} in {}",
                req.news_id, req.channel_name
            )));
        };

        news.replies.push(Reply {
            by: host.caller(),
            news_id: req.news_id.clone(),
            text: req.text,
        });
        self.storage.insert_channel(channel);

        info!(channel = %req.channel_name, news_id = %req.news_id, "reply appended");
        Ok("reply sent".into())
    }
}

/// A field counts as missing when trimming leaves nothing.
fn blank(s: &str) -> bool {
    s.trim().is_empty()
}
