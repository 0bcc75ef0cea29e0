//! Bounded hash cache backing `precheck_duplicate` (spec.md §4.9, §9
//! "Duplicate filter scope"): `cfg.hash_cache_size` capacity, ties
//! entries loosely to "the current admission scope" by simply being
//! written once per `submit_tx` call — repeated lookups within one
//! submission hit the cache; stale entries evict under LRU pressure.

use alloy_primitives::B256;
use schnellru::{ByLength, LruMap};

/// An insertion/access-ordered bounded set of transaction hashes already
/// seen by the pool, independent of whether the transaction is still
/// held in a typed container (spec.md §4.9 `pool.is_known`).
#[derive(Debug)]
pub struct KnownHashCache {
    seen: LruMap<B256, (), ByLength>,
}

impl KnownHashCache {
    /// An empty cache bounded at `capacity` distinct hashes.
    pub fn new(capacity: u32) -> Self {
        Self { seen: LruMap::new(ByLength::new(capacity.max(1))) }
    }

    /// `true` iff `hash` has been marked known and has not since been
    /// evicted.
    pub fn is_known(&mut self, hash: B256) -> bool {
        self.seen.get(&hash).is_some()
    }

    /// Marks `hash` known for the current (and any future) admission
    /// scope, until LRU pressure evicts it.
    pub fn mark_known(&mut self, hash: B256) {
        self.seen.insert(hash, ());
    }

    /// Number of hashes currently tracked.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// `true` iff no hash is currently tracked.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmarked_hash_is_not_known() {
        let mut cache = KnownHashCache::new(4);
        assert!(!cache.is_known(B256::repeat_byte(0x01)));
    }

    #[test]
    fn marked_hash_becomes_known() {
        let mut cache = KnownHashCache::new(4);
        let hash = B256::repeat_byte(0x01);
        cache.mark_known(hash);
        assert!(cache.is_known(hash));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn capacity_overflow_evicts_the_least_recently_used_entry() {
        let mut cache = KnownHashCache::new(2);
        let a = B256::repeat_byte(0x01);
        let b = B256::repeat_byte(0x02);
        let c = B256::repeat_byte(0x03);
        cache.mark_known(a);
        cache.mark_known(b);
        cache.mark_known(c);
        assert!(!cache.is_known(a));
        assert!(cache.is_known(b));
        assert!(cache.is_known(c));
    }
}
