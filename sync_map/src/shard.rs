use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

pub type Shard<K, V, S> = RwLock<HashMap<K, V, S>>;

pub struct Shards<K, V, S> {
    shards: Box<[Shard<K, V, S>]>,
    hasher: S,
    // zero when there is a single shard
    index_bits: u32,
}

impl<K: Eq + Hash, V, S: BuildHasher + Clone> Shards<K, V, S> {
    // assumes count is a power of two
    pub fn new(count: usize, hasher: S) -> Self {
        let shards = (0..count)
            .map(|_| RwLock::new(HashMap::with_hasher(hasher.clone())))
            .collect();
        Self {
            shards,
            hasher,
            index_bits: count.trailing_zeros(),
        }
    }

    pub fn shard(&self, key: &K) -> &Shard<K, V, S> {
        &self.shards[self.index(key)]
    }

    // The top 7 bits and the low bits of the hash are what the inner
    // HashMap uses, so the shard is picked from the bits in between.
    fn index(&self, key: &K) -> usize {
        if self.index_bits == 0 {
            return 0;
        }
        let hash = self.hasher.hash_one(key);
        ((hash << 7) >> (64 - self.index_bits)) as usize
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shard<K, V, S>> {
        self.shards.iter()
    }

    pub fn len(&self) -> usize {
        self.shards.len()
    }
}
