pub mod map;
pub mod storage;

pub use map::{MemoryId, StableMap};
pub use storage::Storage;
