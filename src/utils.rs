//! Prime sizing and convenience extensions for `ChainTable`.

use crate::ChainTable;
use crate::policy::{KeyEqual, KeyHash};
use std::hash::Hash;

/// Returns the smallest integer `>= requested` with no divisor in
/// `[2, sqrt(n)]`.
///
/// `0` and `1` are returned unchanged; the table treats them as valid
/// degenerate sizes. Called at construction and at every rehash to pick the
/// bucket count.
#[must_use]
pub fn next_prime(requested: usize) -> usize {
    if requested < 2 {
        return requested;
    }

    let mut candidate = requested;
    loop {
        if is_prime(candidate) {
            return candidate;
        }
        candidate = candidate.saturating_add(1);
    }
}

/// Trial division up to the square root of `candidate`.
fn is_prime(candidate: usize) -> bool {
    let mut divisor = 2_usize;
    while divisor.saturating_mul(divisor) <= candidate {
        if candidate.checked_rem(divisor) == Some(0) {
            return false;
        }
        divisor = divisor.saturating_add(1);
    }
    true
}

/// Extension trait for table implementations that provides additional
/// utility methods
pub trait TableExtensions<K, V> {
    /// Returns the keys of the table as a Vec
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the table as a Vec
    fn values(&self) -> Vec<V>;

    /// Returns true if the table contains the given key under its equality
    /// policy
    fn contains_key(&self, key: &K) -> bool;
}

impl<K, V, H, E> TableExtensions<K, V> for ChainTable<K, V, H, E>
where
    K: Clone,
    V: Clone,
    H: KeyHash<K>,
    E: KeyEqual<K>,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.retrieve(key).is_some()
    }
}

/// Creates a `ChainTable` with default policies from an iterator of
/// key-value pairs
#[allow(dead_code)]
pub fn from_iter<K, V, I>(iter: I) -> ChainTable<K, V>
where
    K: Hash + PartialEq,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = ChainTable::new();

    for (key, value) in iter {
        table.insert(key, value);
    }

    table
}
