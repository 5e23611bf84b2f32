mod map;
mod options;
mod shard;

pub use map::ConcurrentMap;
pub use options::{MapOptions, MAX_SHARD_COUNT};
