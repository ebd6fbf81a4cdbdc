use crate::policy::{KeyEqual, KeyHash, NotFound, StdKeyEqual, StdKeyHash};
use crate::utils::next_prime;
use std::fmt;
use std::hash::Hash;
use std::slice;

/// Bucket count requested when none is given; sized like a small lookup
/// table.
const DEFAULT_BUCKETS: usize = 11;

/// A key-value pair owned by the bucket that stores it.
///
/// The key is immutable once created (mutating it would strand the entry in
/// the wrong chain); the value may be overwritten in place.
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
}

/// A hash table with separate chaining and prime-sized buckets.
///
/// Colliding keys are kept in a per-bucket chain and resolved by a linear
/// scan under the equality policy. The bucket count is always the smallest
/// prime at or above the requested size, and the table rehashes to roughly
/// double its size as soon as the load factor reaches 1.0 after an
/// insertion.
///
/// Hashing and equality are independent injectable policies; the table does
/// not check that they agree, so a hash coarser than the equality predicate
/// is honored as-is (see [`AcctNumberHash`](crate::AcctNumberHash) for a
/// deliberate example).
///
/// Note: This implementation is not thread-safe; callers needing shared
/// access must provide their own synchronization.
pub struct ChainTable<K, V, H = StdKeyHash, E = StdKeyEqual> {
    /// The buckets, each an ordered chain of entries
    buckets: Vec<Vec<Entry<K, V>>>,
    /// Current number of entries across all chains
    count: usize,
    /// Hash policy mapping keys to bucket slots
    hasher: H,
    /// Equality policy deciding which entries a key matches
    equal: E,
}

impl<K: Hash + PartialEq, V> ChainTable<K, V> {
    /// Creates a table with the default bucket count and default policies
    #[must_use]
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Creates a table with default policies and at least `requested`
    /// buckets, rounded up to the next prime
    #[must_use]
    pub fn with_buckets(requested: usize) -> Self {
        Self::with_policies(requested, StdKeyHash, StdKeyEqual)
    }
}

impl<K: Hash + PartialEq, V> Default for ChainTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H, E> ChainTable<K, V, H, E>
where
    H: KeyHash<K>,
    E: KeyEqual<K>,
{
    /// Creates a table with the given hash and equality policies and at
    /// least `requested` buckets, rounded up to the next prime.
    ///
    /// Requested sizes of 0 and 1 are honored as degenerate bucket counts;
    /// the table grows out of them on first insertion.
    pub fn with_policies(requested: usize, hasher: H, equal: E) -> Self {
        let bucket_count = next_prime(requested);
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);

        Self { buckets, count: 0, hasher, equal }
    }

    /// Maps a key to its bucket slot via the hash policy and the current
    /// bucket count
    #[allow(clippy::cast_possible_truncation)]
    fn bucket_index(&self, key: &K) -> usize {
        let hash = self.hasher.hash_key(key);
        // checked_rem covers the zero-bucket table; callers grow before
        // relying on the slot
        hash.checked_rem(self.buckets.len() as u64).map_or(0, |slot| slot as usize)
    }

    /// Inserts a key-value pair, returning `true` when a new entry was
    /// appended and `false` when an existing entry's value was overwritten
    /// in place.
    ///
    /// After a counted insertion the table rehashes synchronously if the
    /// load factor reached 1.0, so the call may reallocate every bucket
    /// before returning.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.buckets.is_empty() {
            self.rehash();
        }

        let slot = self.bucket_index(&key);
        let equal = &self.equal;
        let Some(bucket) = self.buckets.get_mut(slot) else {
            return false; // Fallback if get_mut fails, shouldn't happen
        };

        if let Some(entry) = bucket.iter_mut().find(|e| equal.eq_key(&e.key, &key)) {
            entry.value = value;
            return false;
        }

        bucket.push(Entry { key, value });
        self.count = self.count.saturating_add(1);

        if self.count >= self.buckets.len() {
            self.rehash();
        }

        true
    }

    /// Removes the entry for `key`, returning `true` when an entry was
    /// unlinked and `false` when the key was absent.
    ///
    /// The bucket array never shrinks.
    pub fn erase(&mut self, key: &K) -> bool {
        let slot = self.bucket_index(key);
        let equal = &self.equal;

        if let Some(bucket) = self.buckets.get_mut(slot) {
            if let Some(found) = bucket.iter().position(|e| equal.eq_key(&e.key, key)) {
                bucket.remove(found);
                self.count = self.count.saturating_sub(1);
                return true;
            }
        }

        false
    }

    /// Looks up the value stored under `key`
    pub fn retrieve(&self, key: &K) -> Option<&V> {
        let slot = self.bucket_index(key);
        self.buckets
            .get(slot)?
            .iter()
            .find(|e| self.equal.eq_key(&e.key, key))
            .map(|e| &e.value)
    }

    /// Looks up a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.bucket_index(key);
        let equal = &self.equal;
        self.buckets
            .get_mut(slot)?
            .iter_mut()
            .find(|e| equal.eq_key(&e.key, key))
            .map(|e| &mut e.value)
    }

    /// Read-or-fail accessor: returns the stored value or [`NotFound`] when
    /// the key is absent. Never inserts.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] when no entry matches `key` under the equality
    /// policy.
    pub fn at(&self, key: &K) -> Result<&V, NotFound> {
        self.retrieve(key).ok_or(NotFound)
    }

    /// Looks up `key`, inserting a default value first when it is absent,
    /// and returns a mutable reference to the stored value.
    ///
    /// This is never a pure query: a miss appends an entry (and may grow the
    /// table) as a side effect of the lookup.
    #[allow(clippy::indexing_slicing, clippy::missing_panics_doc)] // slot is always within the bucket array
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        if self.buckets.is_empty() {
            self.rehash();
        }
        // Grow up front on a miss so the borrow returned below survives
        // the call; the resulting state matches insert-then-rehash.
        if self.retrieve(&key).is_none() && self.count.saturating_add(1) >= self.buckets.len() {
            self.rehash();
        }

        let slot = self.bucket_index(&key);
        let equal = &self.equal;
        let bucket = &mut self.buckets[slot];

        match bucket.iter().position(|e| equal.eq_key(&e.key, &key)) {
            Some(found) => &mut bucket[found].value,
            None => {
                bucket.push(Entry { key, value: V::default() });
                self.count = self.count.saturating_add(1);
                let end = bucket.len().saturating_sub(1);
                &mut bucket[end].value
            }
        }
    }

    /// Returns the chain length of the bucket `key` hashes to.
    ///
    /// This is a bucket-occupancy diagnostic, not a presence test: the
    /// result counts every entry sharing the slot, whether or not any of
    /// them equals `key`.
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        let slot = self.bucket_index(key);
        self.buckets.get(slot).map_or(0, Vec::len)
    }

    /// Returns an iterator over the key-value pairs, bucket by bucket.
    ///
    /// Positions are valid only until the next structural mutation.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { outer: self.buckets.iter(), inner: [].iter() }
    }

    /// Rebuilds the bucket array at the next prime at or above double the
    /// current size, moving every entry into its new chain.
    ///
    /// O(n) stop-the-world; entries transfer by value and chain order is
    /// not preserved.
    fn rehash(&mut self) {
        let bucket_count = next_prime(self.buckets.len().saturating_mul(2).max(1));
        let mut fresh = Vec::with_capacity(bucket_count);
        fresh.resize_with(bucket_count, Vec::new);

        let drained = std::mem::replace(&mut self.buckets, fresh);
        for entry in drained.into_iter().flatten() {
            let slot = self.bucket_index(&entry.key);
            if let Some(bucket) = self.buckets.get_mut(slot) {
                bucket.push(entry);
            }
        }
    }
}

impl<K, V, H, E> ChainTable<K, V, H, E> {
    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }
        self.count as f64 / self.buckets.len() as f64
    }

    /// Removes every entry, keeping the bucket array at its current size
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.count = 0;
    }
}

impl<K, V, H, E> Clone for ChainTable<K, V, H, E>
where
    K: Clone,
    V: Clone,
    H: KeyHash<K> + Clone,
    E: KeyEqual<K> + Clone,
{
    fn clone(&self) -> Self {
        let mut fresh = Self {
            buckets: self.buckets.clone(),
            count: self.count,
            hasher: self.hasher.clone(),
            equal: self.equal.clone(),
        };
        // Renormalize a source whose load factor drifted past 1.0
        if fresh.count > fresh.buckets.len() {
            fresh.rehash();
        }
        fresh
    }
}

impl<K, V, H, E> Extend<(K, V)> for ChainTable<K, V, H, E>
where
    H: KeyHash<K>,
    E: KeyEqual<K>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[allow(clippy::missing_fields_in_debug)]
impl<K, V, H, E> fmt::Debug for ChainTable<K, V, H, E>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainTable")
            .field("buckets", &self.buckets)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

/// Diagnostic dump of the bucket layout: one line per bucket, the slot index
/// followed by ` -> value` for each chained entry.
///
/// Useful for inspecting bucket distribution in tests; not a stable format.
impl<K, V, H, E> fmt::Display for ChainTable<K, V, H, E>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (slot, bucket) in self.buckets.iter().enumerate() {
            write!(f, "{slot}")?;
            for entry in bucket {
                write!(f, " -> {}", entry.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the key-value pairs of the table
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Buckets not yet visited
    outer: slice::Iter<'a, Vec<Entry<K, V>>>,
    /// Remainder of the chain currently being walked
    inner: slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.inner.next() {
                return Some((&entry.key, &entry.value));
            }
            self.inner = self.outer.next()?.iter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn test_insert_and_retrieve() {
        let mut table = ChainTable::new();
        assert!(table.insert("key1".to_string(), 1));
        assert!(table.insert("key2".to_string(), 2));
        assert!(table.insert("key3".to_string(), 3));

        assert_eq!(table.retrieve(&"key1".to_string()), Some(&1));
        assert_eq!(table.retrieve(&"key2".to_string()), Some(&2));
        assert_eq!(table.retrieve(&"key3".to_string()), Some(&3));
        assert_eq!(table.retrieve(&"key4".to_string()), None);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut table = ChainTable::new();
        assert!(table.insert("key1".to_string(), 1));
        assert!(!table.insert("key1".to_string(), 10));
        assert_eq!(table.retrieve(&"key1".to_string()), Some(&10));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_erase_is_idempotent() {
        let mut table = ChainTable::new();
        table.insert("key1".to_string(), 1);
        table.insert("key2".to_string(), 2);

        assert!(!table.erase(&"missing".to_string()));
        assert_eq!(table.len(), 2);

        assert!(table.erase(&"key1".to_string()));
        assert_eq!(table.retrieve(&"key1".to_string()), None);
        assert_eq!(table.len(), 1);

        assert!(!table.erase(&"key1".to_string()));
        assert_eq!(table.len(), 1);
        assert_eq!(table.retrieve(&"key2".to_string()), Some(&2));
    }

    #[test]
    fn test_at_reports_not_found() {
        let mut table = ChainTable::new();
        table.insert("key1".to_string(), 1);

        assert_eq!(table.at(&"key1".to_string()), Ok(&1));
        assert_eq!(table.at(&"missing".to_string()), Err(NotFound));
    }

    #[test]
    fn test_get_or_insert_default() {
        let mut table: ChainTable<String, i32> = ChainTable::new();

        // Miss: the lookup itself inserts a default value
        *table.get_or_insert_default("counter".to_string()) += 1;
        assert_eq!(table.len(), 1);
        assert_eq!(table.retrieve(&"counter".to_string()), Some(&1));

        // Hit: the existing value is returned, nothing is appended
        *table.get_or_insert_default("counter".to_string()) += 1;
        assert_eq!(table.len(), 1);
        assert_eq!(table.retrieve(&"counter".to_string()), Some(&2));
    }

    #[test]
    fn test_get_or_insert_default_grows_under_load() {
        let mut table: ChainTable<u64, u64, _, _> =
            ChainTable::with_policies(2, |key: &u64| *key, StdKeyEqual);
        for key in 0..6 {
            *table.get_or_insert_default(key) = key;
        }
        assert_eq!(table.len(), 6);
        assert!(table.bucket_count() > 6);
        for key in 0..6 {
            assert_eq!(table.retrieve(&key), Some(&key));
        }
    }

    #[test]
    fn test_count_reports_chain_length() {
        // Identity hash over 11 buckets: 3 and 14 share slot 3
        let mut table: ChainTable<u64, u64, _, _> =
            ChainTable::with_policies(11, |key: &u64| *key, StdKeyEqual);
        table.insert(3, 30);
        table.insert(14, 140);

        assert_eq!(table.count(&3), 2);
        assert_eq!(table.count(&14), 2);
        assert_eq!(table.count(&0), 0);

        // Both entries remain independently retrievable
        assert_eq!(table.retrieve(&3), Some(&30));
        assert_eq!(table.retrieve(&14), Some(&140));
    }

    #[test]
    fn test_rehash_at_full_load() {
        // Predictable slots: identity hash, default-sized table of 11.
        // The 11th insertion pushes the load factor to 1.0 and the table
        // must grow to the smallest prime at or above 22.
        let mut table: ChainTable<u64, u64, _, _> =
            ChainTable::with_policies(11, |key: &u64| *key, StdKeyEqual);
        assert_eq!(table.bucket_count(), 11);

        for key in 0..12 {
            assert!(table.insert(key, key * 10));
        }

        assert_eq!(table.bucket_count(), 23);
        assert_eq!(table.len(), 12);
        for key in 0..12 {
            assert_eq!(table.retrieve(&key), Some(&(key * 10)));
        }
    }

    #[test]
    fn test_rehash_preserves_last_written_values() {
        let mut table = ChainTable::with_buckets(3);
        for key in 0..50_u32 {
            table.insert(key.to_string(), key);
        }
        for key in 0..25_u32 {
            table.insert(key.to_string(), key + 1000);
        }

        assert_eq!(table.len(), 50);
        assert!(table.load_factor() < 1.0);
        for key in 0..50_u32 {
            let expected = if key < 25 { key + 1000 } else { key };
            assert_eq!(table.retrieve(&key.to_string()), Some(&expected));
        }
    }

    #[test]
    fn test_grows_out_of_degenerate_sizes() {
        let mut zero = ChainTable::with_buckets(0);
        assert_eq!(zero.bucket_count(), 0);
        assert!(zero.insert("a".to_string(), 1));
        assert_eq!(zero.retrieve(&"a".to_string()), Some(&1));
        assert!(zero.bucket_count() >= 1);

        let mut one = ChainTable::with_buckets(1);
        assert_eq!(one.bucket_count(), 1);
        one.insert("a".to_string(), 1);
        one.insert("b".to_string(), 2);
        assert_eq!(one.len(), 2);
        assert_eq!(one.retrieve(&"b".to_string()), Some(&2));
    }

    #[test]
    fn test_clear_keeps_bucket_array() {
        let mut table = ChainTable::new();
        table.insert("key1".to_string(), 1);
        table.insert("key2".to_string(), 2);
        let buckets_before = table.bucket_count();

        table.clear();

        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.bucket_count(), buckets_before);
        assert_eq!(table.retrieve(&"key1".to_string()), None);
    }

    #[test]
    fn test_clone_is_a_deep_copy() {
        let mut table = ChainTable::new();
        table.insert("key1".to_string(), 1);

        let snapshot = table.clone();
        table.insert("key1".to_string(), 99);
        table.insert("key2".to_string(), 2);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.retrieve(&"key1".to_string()), Some(&1));
        assert_eq!(snapshot.bucket_count(), table.bucket_count());
    }

    #[test]
    fn test_get_mut() {
        let mut table = ChainTable::new();
        table.insert("key1".to_string(), 1);

        if let Some(value) = table.get_mut(&"key1".to_string()) {
            *value += 10;
        }

        assert_eq!(table.retrieve(&"key1".to_string()), Some(&11));
        assert_eq!(table.get_mut(&"missing".to_string()), None);
    }

    #[test]
    fn test_iter_visits_every_entry() {
        let mut table = ChainTable::new();
        table.insert("key1".to_string(), 1);
        table.insert("key2".to_string(), 2);
        table.insert("key3".to_string(), 3);

        let mut count = 0;
        let mut sum = 0;
        for (_, &value) in table.iter() {
            count += 1;
            sum += value;
        }

        assert_eq!(count, 3);
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_extend() {
        let mut table: ChainTable<String, i32> = ChainTable::new();
        table.extend(vec![("a".to_string(), 1), ("b".to_string(), 2)]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.retrieve(&"b".to_string()), Some(&2));
    }

    #[test]
    fn test_display_dumps_bucket_layout() {
        let mut table: ChainTable<u64, u64, _, _> =
            ChainTable::with_policies(3, |key: &u64| *key, StdKeyEqual);
        table.insert(1, 10);
        table.insert(4, 40);

        assert_eq!(format!("{table}"), "0\n1 -> 10 -> 40\n2\n");
    }

    proptest! {
        // Model check against std's HashMap: every op agrees, and the
        // size/load-factor invariants hold after each step.
        #[test]
        fn prop_matches_std_hash_map(
            ops in proptest::collection::vec((0_u8..3, 0_u8..32, 0_i32..100), 1..200),
        ) {
            let mut table: ChainTable<u8, i32> = ChainTable::new();
            let mut model: HashMap<u8, i32> = HashMap::new();

            for (op, key, value) in ops {
                match op {
                    0 => prop_assert_eq!(
                        table.insert(key, value),
                        model.insert(key, value).is_none()
                    ),
                    1 => prop_assert_eq!(table.erase(&key), model.remove(&key).is_some()),
                    _ => prop_assert_eq!(table.retrieve(&key), model.get(&key)),
                }

                prop_assert_eq!(table.len(), model.len());
                prop_assert!(table.len() < table.bucket_count());
                let chained: usize = table.buckets.iter().map(Vec::len).sum();
                prop_assert_eq!(chained, table.len());
            }
        }
    }
}
