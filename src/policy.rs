//! Hash and equality policies injected into `ChainTable`.
//!
//! The table never hashes or compares keys directly; both concerns go
//! through these traits so callers can pair any hash granularity with any
//! equality granularity. Closures implement both traits, which keeps test
//! setups with predictable bucket placement short.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Strategy mapping a key to an unsigned hash value.
pub trait KeyHash<K> {
    /// Hashes `key` into a `u64`; the table reduces it modulo the bucket
    /// count.
    fn hash_key(&self, key: &K) -> u64;
}

/// Strategy deciding whether two keys are the same entry.
pub trait KeyEqual<K> {
    /// Returns `true` when `lhs` and `rhs` name the same entry.
    fn eq_key(&self, lhs: &K, rhs: &K) -> bool;
}

impl<K, F> KeyHash<K> for F
where
    F: Fn(&K) -> u64,
{
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

impl<K, F> KeyEqual<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn eq_key(&self, lhs: &K, rhs: &K) -> bool {
        self(lhs, rhs)
    }
}

/// Default hash policy: the ambient general-purpose hash over `K: Hash`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdKeyHash;

impl<K: Hash> KeyHash<K> for StdKeyHash {
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

/// Default equality policy: plain value equality over `K: PartialEq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdKeyEqual;

impl<K: PartialEq> KeyEqual<K> for StdKeyEqual {
    fn eq_key(&self, lhs: &K, rhs: &K) -> bool {
        lhs == rhs
    }
}

/// Error returned by the read-or-fail accessor
/// [`at`](crate::ChainTable::at) when the key is absent.
///
/// Every other table operation reports its outcome through a boolean or an
/// `Option`; this is the crate's only failure kind, and it is always
/// recoverable by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound;

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key not found")
    }
}

impl std::error::Error for NotFound {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_hash_is_deterministic() {
        let a = StdKeyHash.hash_key(&"key".to_string());
        let b = StdKeyHash.hash_key(&"key".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn test_closure_policies() {
        let hash = |key: &u64| *key;
        let equal = |lhs: &u64, rhs: &u64| lhs == rhs;
        assert_eq!(hash.hash_key(&7), 7);
        assert!(equal.eq_key(&7, &7));
        assert!(!equal.eq_key(&7, &8));
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(NotFound.to_string(), "key not found");
    }
}
