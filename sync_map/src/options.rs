use serde::{Deserialize, Serialize};

pub const MAX_SHARD_COUNT: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Rounded up to a power of two and clamped to `1..=MAX_SHARD_COUNT`.
    pub shard_count: usize,
}

impl MapOptions {
    pub fn with_shard_count(shard_count: usize) -> Self {
        Self { shard_count }
    }

    pub(crate) fn effective_shard_count(&self) -> usize {
        self.shard_count.clamp(1, MAX_SHARD_COUNT).next_power_of_two()
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            shard_count: (num_cpus::get() * 4)
                .min(MAX_SHARD_COUNT)
                .next_power_of_two(),
        }
    }
}
