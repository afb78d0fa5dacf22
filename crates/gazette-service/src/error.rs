use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way an operation can be rejected. Each variant is an externally
/// observable category; the string carries human-readable detail only.
///
/// No variant is fatal and none is retried internally — a failed
/// precondition surfaces immediately, before any store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ServiceError {
    #[error("username is required: {0}")]
    UsernameRequired(String),

    #[error("username already taken: {0}")]
    UsernameTaken(String),

    #[error("credentials missing: {0}")]
    CredentialsMissing(String),

    #[error("channel already exists: {0}")]
    ChannelAlreadyExists(String),

    #[error("user does not exist: {0}")]
    UserDoesNotExist(String),

    #[error("channel does not exist: {0}")]
    ChannelDoesNotExist(String),

    #[error("already a member: {0}")]
    AlreadyFollowing(String),

    #[error("not a member: {0}")]
    NotAFollower(String),

    #[error("only the owner can delete the channel: {0}")]
    OnlyOwnerCanDelete(String),

    #[error("only the owner can post news: {0}")]
    OnlyOwnerCanPost(String),

    #[error("only followers can reply: {0}")]
    OnlyFollowersCanReply(String),

    #[error("no news with that id: {0}")]
    UnknownNewsId(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
