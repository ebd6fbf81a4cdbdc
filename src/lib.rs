//! # chaintbl
//!
//! A separate-chaining hash table with prime-sized buckets, automatic
//! rehashing on load-factor overflow, and independently injectable hash and
//! equality policies.
//!
//! Every operation hashes the key, selects a bucket by `hash % bucket_count`
//! and scans that bucket's chain under the equality policy. The bucket count
//! is always the smallest prime at or above the requested size, and the
//! table rehashes synchronously to roughly double its size as soon as an
//! insertion pushes the load factor to 1.0.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chaintbl::ChainTable;
//!
//! // Create a new table (11 buckets by default)
//! let mut table = ChainTable::new();
//!
//! // Insert values; `true` means a new entry was appended
//! assert!(table.insert("apple".to_string(), 1));
//! assert!(table.insert("banana".to_string(), 2));
//!
//! // Retrieve values
//! assert_eq!(table.retrieve(&"apple".to_string()), Some(&1));
//!
//! // Re-inserting overwrites in place and reports `false`
//! assert!(!table.insert("apple".to_string(), 10));
//! assert_eq!(table.retrieve(&"apple".to_string()), Some(&10));
//! assert_eq!(table.len(), 2);
//!
//! // Remove values
//! assert!(table.erase(&"apple".to_string()));
//! assert_eq!(table.retrieve(&"apple".to_string()), None);
//! ```
//!
//! ## Custom Policies
//!
//! Hashing and equality are independent strategies, so a hash may be
//! deliberately coarser than equality. The bundled account key does exactly
//! that, hashing only the account number while comparing all four key
//! fields:
//!
//! ```rust
//! use chaintbl::{AcctKeyEqual, AcctNumberHash, ChainTable};
//!
//! let mut balances = ChainTable::with_policies(11, AcctNumberHash, AcctKeyEqual);
//! balances.insert(("Alice".to_string(), 1, 22, 77), 100.0_f32);
//! balances.insert(("Bob".to_string(), 1, 22, 77), 250.0);
//!
//! // Same chain (the hash sees only the account number)...
//! assert_eq!(balances.count(&("Alice".to_string(), 1, 22, 77)), 2);
//! // ...but distinct entries under the equality policy.
//! assert_eq!(balances.len(), 2);
//! assert_eq!(balances.retrieve(&("Bob".to_string(), 1, 22, 77)), Some(&250.0));
//! ```
//!
//! Closures work as policies too, which keeps bucket placement predictable
//! in tests:
//!
//! ```rust
//! use chaintbl::{ChainTable, StdKeyEqual};
//!
//! let mut table: ChainTable<u64, &str, _, _> =
//!     ChainTable::with_policies(11, |key: &u64| *key, StdKeyEqual);
//! table.insert(3, "three");
//! table.insert(14, "fourteen"); // 14 % 11 == 3: same chain
//! assert_eq!(table.count(&3), 2);
//! ```

/// Module implementing the bank account record and its key policies
mod account;
/// Module implementing the separate-chaining hash table
mod chain_table;
/// Module defining the injectable hash/equality policy seam
mod policy;
/// Prime sizing and utility extensions for the table
mod utils;

pub use account::{AcctKey, AcctKeyEqual, AcctNumberHash, Account};
pub use chain_table::{ChainTable, Iter};
pub use policy::{KeyEqual, KeyHash, NotFound, StdKeyEqual, StdKeyHash};
pub use utils::{TableExtensions, next_prime};
