//! Domain service for the community news backend.
//!
//! Users register under a unique username, create named channels, follow
//! and unfollow them, post news into channels they own, and reply to news
//! in channels they follow. All state lives in the key-value namespaces of
//! [`gazette_store::Storage`]; the host runtime supplies caller identity,
//! time, and fresh ids through [`gazette_types::HostEnv`].
//!
//! Every operation validates before it mutates: an `Err` return implies no
//! store write happened. Mutating operations take `&mut self`, matching
//! the host's guarantee that invocations never interleave.

pub mod error;
pub mod service;

pub use error::ServiceError;
pub use service::CommunityService;
