use reth_primitives_traits::BlockHash;
use schnellru::{ByLength, LruMap};

use crate::provider::{AncestorSource, BlockhashError};

/// Keyed by `current.parent_hash`, each entry is a lazily-extended list of
/// ancestor hashes: `entry[i]` is the hash at depth `i + 2` from the block
/// whose parent hash is the key (depth 1 is `current.parent_hash` itself,
/// which the legacy provider answers without consulting this cache).
///
/// Capacity 32; `schnellru`'s `ByLength` limiter evicts the
/// least-recently-touched key once a 33rd distinct key is inserted,
/// matching spec.md §4.5 / §8's "32-entry LRU cap" boundary case for
/// insertion-only access patterns.
#[derive(Debug)]
pub struct BlockhashCache {
    entries: LruMap<BlockHash, Vec<BlockHash>, ByLength>,
}

impl Default for BlockhashCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockhashCache {
    /// Capacity of the ancestor-list cache (spec.md §4.5).
    pub const CAPACITY: u32 = 32;

    /// An empty cache.
    pub fn new() -> Self {
        Self { entries: LruMap::new(ByLength::new(Self::CAPACITY)) }
    }

    /// Resolves the ancestor hash at `needed_len + 1` steps before
    /// `parent_hash` (i.e. depth `needed_len + 1` from the block whose
    /// parent is `parent_hash`), extending the cached list from
    /// `parent_number` via `source` as needed.
    pub fn resolve(
        &mut self,
        source: &impl AncestorSource,
        parent_hash: BlockHash,
        parent_number: u64,
        needed_len: usize,
    ) -> Result<BlockHash, BlockhashError> {
        let existing_len = self.entries.get(&parent_hash).map_or(0, Vec::len);

        if existing_len < needed_len {
            let mut entries = self.entries.get(&parent_hash).cloned().unwrap_or_default();
            let mut cur_hash = entries.last().copied().unwrap_or(parent_hash);
            let mut cur_number = parent_number - entries.len() as u64;

            while entries.len() < needed_len {
                let header = source.header_by_hash(cur_hash).ok_or(BlockhashError::MissingBlockhash)?;
                if header.number != cur_number {
                    return Err(BlockhashError::MissingBlockhash);
                }
                entries.push(header.parent_hash);
                cur_hash = header.parent_hash;
                cur_number = cur_number.saturating_sub(1);
            }

            self.entries.insert(parent_hash, entries);
        }

        Ok(self.entries.get(&parent_hash).expect("just populated above")[needed_len - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use reth_primitives::Header;
    use std::collections::HashMap;

    struct FakeChain(HashMap<BlockHash, Header>);

    impl AncestorSource for FakeChain {
        fn header_by_hash(&self, hash: BlockHash) -> Option<Header> {
            self.0.get(&hash).cloned()
        }
    }

    fn hash(n: u64) -> BlockHash {
        B256::from(alloy_primitives::U256::from(n))
    }

    fn chain_of(len: u64) -> FakeChain {
        let mut map = HashMap::new();
        for number in 0..len {
            let parent_hash = if number == 0 { BlockHash::ZERO } else { hash(number - 1) };
            map.insert(hash(number), Header { number, parent_hash, ..Default::default() });
        }
        FakeChain(map)
    }

    #[test]
    fn resolves_and_caches_ancestor_chain() {
        let chain = chain_of(10);
        let mut cache = BlockhashCache::new();
        // parent_hash = hash(9) (number 9); depth-2 ancestor (needed_len=1) is hash(8)'s parent = hash(7).
        let resolved = cache.resolve(&chain, hash(9), 9, 1).unwrap();
        assert_eq!(resolved, hash(7));
    }

    #[test]
    fn extending_a_shorter_cached_list_reuses_the_prefix() {
        let chain = chain_of(10);
        let mut cache = BlockhashCache::new();
        cache.resolve(&chain, hash(9), 9, 1).unwrap();
        let deeper = cache.resolve(&chain, hash(9), 9, 3).unwrap();
        assert_eq!(deeper, hash(5));
    }

    #[test]
    fn missing_ancestor_fails() {
        let chain = chain_of(3);
        let mut cache = BlockhashCache::new();
        let err = cache.resolve(&chain, hash(2), 2, 5).unwrap_err();
        assert!(matches!(err, BlockhashError::MissingBlockhash));
    }

    #[test]
    fn capacity_32_evicts_the_oldest_key_on_a_33rd_insert() {
        let chain = chain_of(300);
        let mut cache = BlockhashCache::new();
        for i in 0..32u64 {
            cache.resolve(&chain, hash(100 + i), 100 + i, 1).unwrap();
        }
        assert!(cache.entries.get(&hash(100)).is_some());
        cache.resolve(&chain, hash(200), 200, 1).unwrap();
        assert!(cache.entries.get(&hash(100)).is_none());
    }
}
