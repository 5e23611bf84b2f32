use crate::shard::Shards;
use crate::MapOptions;
use ahash::RandomState;
use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// Hash map safe to share between threads.
///
/// Keys are spread over independently locked shards, so operations on
/// different shards never contend. Every single-key operation is atomic with
/// respect to other operations on the same key.
pub struct ConcurrentMap<K, V, S = RandomState> {
    shards: Shards<K, V, S>,
}

impl<K: Eq + Hash, V> ConcurrentMap<K, V> {
    pub fn new() -> Self {
        Self::with_options(MapOptions::default())
    }

    pub fn with_options(options: MapOptions) -> Self {
        Self::with_hasher(options, RandomState::new())
    }
}

impl<K: Eq + Hash, V> Default for ConcurrentMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V, S: BuildHasher + Clone> ConcurrentMap<K, V, S> {
    pub fn with_hasher(options: MapOptions, hasher: S) -> Self {
        let shard_count = options.effective_shard_count();
        log::debug!("creating concurrent map with {shard_count} shards");
        Self {
            shards: Shards::new(shard_count, hasher),
        }
    }

    pub fn store(&self, key: K, value: V) {
        self.shards.shard(&key).write().insert(key, value);
    }

    pub fn delete(&self, key: &K) {
        self.shards.shard(key).write().remove(key);
    }

    pub fn load_and_delete(&self, key: &K) -> Option<V> {
        self.shards.shard(key).write().remove(key)
    }

    /// Stores `value`, returning whatever was there before.
    pub fn swap(&self, key: K, value: V) -> Option<V> {
        self.shards.shard(&key).write().insert(key, value)
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.write().clear();
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}

impl<K: Eq + Hash, V: Clone, S: BuildHasher + Clone> ConcurrentMap<K, V, S> {
    pub fn load(&self, key: &K) -> Option<V> {
        self.shards.shard(key).read().get(key).cloned()
    }

    /// Returns the existing value and `true`, or stores `value` and returns
    /// it with `false`.
    pub fn load_or_store(&self, key: K, value: V) -> (V, bool) {
        let mut shard = self.shards.shard(&key).write();
        match shard.entry(key) {
            Entry::Occupied(entry) => (entry.get().clone(), true),
            Entry::Vacant(entry) => (entry.insert(value).clone(), false),
        }
    }
}

impl<K: Eq + Hash, V: PartialEq, S: BuildHasher + Clone> ConcurrentMap<K, V, S> {
    /// Replaces the value for `key` with `new` only if it currently equals
    /// `old`. A missing key never matches.
    pub fn compare_and_swap(&self, key: &K, old: &V, new: V) -> bool {
        let mut shard = self.shards.shard(key).write();
        match shard.get_mut(key) {
            Some(current) if *current == *old => {
                *current = new;
                true
            }
            _ => false,
        }
    }

    pub fn compare_and_delete(&self, key: &K, old: &V) -> bool {
        let mut shard = self.shards.shard(key).write();
        if shard.get(key) == Some(old) {
            shard.remove(key);
            true
        } else {
            false
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone, S: BuildHasher + Clone> ConcurrentMap<K, V, S> {
    /// Calls `f` for each entry until it returns `false`.
    ///
    /// Each shard is copied out before `f` sees it, so `f` may freely modify
    /// the map. Entries stored or deleted concurrently may or may not be
    /// visited.
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for shard in self.shards.iter() {
            let entries: Vec<(K, V)> = shard
                .read()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            for (key, value) in &entries {
                if !f(key, value) {
                    return;
                }
            }
        }
    }
}

impl<K: Eq + Hash, V, S: BuildHasher + Clone> fmt::Debug for ConcurrentMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentMap")
            .field("len", &self.len())
            .field("shard_count", &self.shard_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    fn small<V>() -> ConcurrentMap<i32, V> {
        ConcurrentMap::with_options(MapOptions::with_shard_count(4))
    }

    #[test]
    fn empty_map() {
        let map = small::<String>();
        assert_eq!(map.load(&1), None);
        assert!(!map.compare_and_swap(&1, &"a".to_string(), "b".to_string()));
        assert_eq!(map.load_and_delete(&1), None);
        assert_eq!(map.load_and_delete(&1), None);
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn store_and_load() {
        let map = small();
        map.store(1, "a");
        assert_eq!(map.load(&1), Some("a"));
        map.store(1, "b");
        assert_eq!(map.load(&1), Some("b"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn compare_and_swap() {
        let map = small();
        map.store(1, "a");

        assert!(map.compare_and_swap(&1, &"a", "b"));
        assert_eq!(map.load(&1), Some("b"));

        assert!(!map.compare_and_swap(&1, &"c", "d"));
        assert_eq!(map.load(&1), Some("b"));
    }

    #[test]
    fn delete() {
        let map = small();
        map.store(1, "a");
        assert_eq!(map.load(&1), Some("a"));

        map.delete(&1);
        assert_eq!(map.load(&1), None);
        map.delete(&1);
        assert!(map.is_empty());
    }

    #[test]
    fn load_or_store() {
        let map = small::<Option<&str>>();

        assert_eq!(map.load_or_store(1, None), (None, false));
        map.delete(&1);
        assert_eq!(map.load(&1), None);

        map.store(1, Some("failure"));
        assert_eq!(map.load_or_store(1, None), (Some("failure"), true));
        assert_eq!(map.load(&1), Some(Some("failure")));
    }

    #[test]
    fn load_and_delete() {
        let map = small();
        map.store(1, "a");
        assert_eq!(map.load_and_delete(&1), Some("a"));
        assert_eq!(map.load_and_delete(&1), None);
    }

    #[test]
    fn range_visits_every_entry() {
        let map = small();
        let mut expected: HashMap<i32, String> =
            (1..=3).map(|key| (key, key.to_string())).collect();
        for (key, value) in &expected {
            map.store(*key, value.clone());
        }

        map.range(|key, value| {
            assert_eq!(expected.remove(key).as_ref(), Some(value));
            true
        });
        assert!(expected.is_empty());
    }

    #[test]
    fn range_stops_early() {
        let map = small();
        for key in 0..100 {
            map.store(key, key);
        }
        let mut visited = 0;
        map.range(|_, _| {
            visited += 1;
            visited < 10
        });
        assert_eq!(visited, 10);
    }

    #[test]
    fn range_may_modify_the_map() {
        let map = small();
        for key in 0..20 {
            map.store(key, key * 2);
        }
        map.range(|key, value| {
            map.store(*key, value + 1);
            true
        });
        for key in 0..20 {
            assert_eq!(map.load(&key), Some(key * 2 + 1));
        }
    }

    #[test]
    fn swap() {
        let map = small::<Option<&str>>();
        map.store(1, None);
        assert_eq!(map.swap(1, Some("failure")), Some(None));

        map.delete(&1);
        assert_eq!(map.load(&1), None);
        assert_eq!(map.swap(1, Some("failure")), None);

        assert_eq!(map.swap(1, None), Some(Some("failure")));
        assert_eq!(map.load(&1), Some(None));
    }

    #[test]
    fn compare_and_delete() {
        let map = small();
        map.store(1, "a");

        assert!(!map.compare_and_delete(&1, &"b"));
        assert_eq!(map.load(&1), Some("a"));

        assert!(map.compare_and_delete(&1, &"a"));
        assert_eq!(map.load(&1), None);
        assert!(!map.compare_and_delete(&1, &"a"));
    }

    #[test]
    fn oversized_shard_count_still_routes_keys() {
        let map = ConcurrentMap::with_options(MapOptions::with_shard_count(usize::MAX));
        assert_eq!(map.shard_count(), crate::MAX_SHARD_COUNT);
        map.store(7, "seven");
        assert_eq!(map.load(&7), Some("seven"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn clear_empties_every_shard() {
        let map = small();
        for key in 0..64 {
            map.store(key, ());
        }
        assert_eq!(map.len(), 64);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(format!("{map:?}"), "ConcurrentMap { len: 0, shard_count: 4 }");
    }

    #[test]
    fn concurrent_stores_and_swaps() {
        let map: ConcurrentMap<u32, u32> = ConcurrentMap::new();
        let threads = 8;
        let per_thread = 500;
        let (sender, receiver) = unbounded();

        std::thread::scope(|scope| {
            for thread in 0..threads {
                let map = &map;
                let sender = sender.clone();
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(thread as u64);
                    for i in 0..per_thread {
                        let key = thread * per_thread + i;
                        map.store(key, 0);
                        // contended counter shared by every thread
                        loop {
                            let current = map.load_or_store(u32::MAX, 0).0;
                            if map.compare_and_swap(&u32::MAX, &current, current + 1) {
                                break;
                            }
                        }
                        if rng.gen_bool(0.5) {
                            assert!(map.compare_and_delete(&key, &0));
                            sender.send(key).unwrap();
                        }
                    }
                });
            }
        });
        drop(sender);

        let deleted: Vec<u32> = receiver.iter().collect();
        assert_eq!(map.load(&u32::MAX), Some(threads * per_thread));
        for key in &deleted {
            assert_eq!(map.load(key), None);
        }
        let stored = (threads * per_thread) as usize - deleted.len();
        assert_eq!(map.len(), stored + 1);
    }
}
