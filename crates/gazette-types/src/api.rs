use serde::{Deserialize, Serialize};

use crate::models::Principal;

// -- Users --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterUserRequest {
    pub username: String,
}

// -- Channels --

/// Shared shape for create/follow/unfollow: a channel name plus the acting
/// username.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelRequest {
    pub channel_name: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteChannelRequest {
    pub channel_name: String,
    pub owner: Principal,
}

// -- News --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostNewsRequest {
    pub title: String,
    pub description: String,
    pub owner: Principal,
    pub channel_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetNewsRequest {
    pub channel_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplyRequest {
    pub channel_name: String,
    pub username: String,
    pub news_id: Principal,
    pub text: String,
}
