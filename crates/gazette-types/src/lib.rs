pub mod api;
pub mod host;
pub mod models;

pub use host::{HostEnv, SystemHost};
pub use models::{Channel, News, Principal, Reply, User};
