//! Bank account record used to exercise custom hash and equality policies.

use crate::policy::{KeyEqual, KeyHash};

/// Key derived from an account: owner name, bank, agency and account number.
pub type AcctKey = (String, i32, i32, i32);

/// A bank account record.
///
/// The record itself carries no identity; tables store it (or its balance)
/// under the key produced by [`Account::key`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Account owner's name
    pub name: String,
    /// Bank number
    pub bank: i32,
    /// Agency number
    pub agency: i32,
    /// Account number
    pub account_num: i32,
    /// Current balance
    pub balance: f32,
}

impl Account {
    /// Returns the key associated with this account
    #[must_use]
    pub fn key(&self) -> AcctKey {
        (self.name.clone(), self.bank, self.agency, self.account_num)
    }
}

/// Hash policy that keys a bucket on the account number alone.
///
/// Paired with [`AcctKeyEqual`] this is deliberately coarser than equality:
/// every key sharing an account number collapses into one chain while the
/// entries stay distinct. That trades bucket distribution for grouping and
/// is a documented hazard of the policy seam; the table does not validate
/// the pairing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcctNumberHash;

impl KeyHash<AcctKey> for AcctNumberHash {
    #[allow(clippy::cast_sign_loss)]
    fn hash_key(&self, key: &AcctKey) -> u64 {
        key.3 as u64
    }
}

/// Equality policy comparing all four fields of an account key.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcctKeyEqual;

impl KeyEqual<AcctKey> for AcctKeyEqual {
    fn eq_key(&self, lhs: &AcctKey, rhs: &AcctKey) -> bool {
        lhs == rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChainTable;

    /// Sample account fixture.
    fn account(name: &str, number: i32, balance: f32) -> Account {
        Account { name: name.to_string(), bank: 1, agency: 22, account_num: number, balance }
    }

    #[test]
    fn test_key_carries_all_identity_fields() {
        let acct = account("Alice", 77, 100.0);
        assert_eq!(acct.key(), ("Alice".to_string(), 1, 22, 77));
    }

    #[test]
    fn test_degenerate_hash_groups_but_equality_separates() {
        // Same account number, different owners: one chain, two entries.
        let alice = account("Alice", 77, 100.0);
        let bob = account("Bob", 77, 250.0);

        let mut table = ChainTable::with_policies(11, AcctNumberHash, AcctKeyEqual);
        assert!(table.insert(alice.key(), alice.balance));
        assert!(table.insert(bob.key(), bob.balance));

        assert_eq!(table.len(), 2);
        assert_eq!(table.count(&alice.key()), 2);
        assert_eq!(table.count(&bob.key()), 2);

        assert_eq!(table.retrieve(&alice.key()), Some(&100.0));
        assert_eq!(table.retrieve(&bob.key()), Some(&250.0));
    }

    #[test]
    fn test_same_owner_same_number_overwrites() {
        let before = account("Alice", 77, 100.0);
        let after = account("Alice", 77, 42.5);

        let mut table = ChainTable::with_policies(11, AcctNumberHash, AcctKeyEqual);
        assert!(table.insert(before.key(), before.balance));
        assert!(!table.insert(after.key(), after.balance));

        assert_eq!(table.len(), 1);
        assert_eq!(table.count(&before.key()), 1);
        assert_eq!(table.retrieve(&before.key()), Some(&42.5));
    }

    #[test]
    fn test_erase_leaves_chain_mates_untouched() {
        let alice = account("Alice", 77, 100.0);
        let bob = account("Bob", 77, 250.0);

        let mut table = ChainTable::with_policies(11, AcctNumberHash, AcctKeyEqual);
        table.insert(alice.key(), alice.balance);
        table.insert(bob.key(), bob.balance);

        assert!(table.erase(&alice.key()));
        assert_eq!(table.len(), 1);
        assert_eq!(table.count(&bob.key()), 1);
        assert_eq!(table.retrieve(&bob.key()), Some(&250.0));
        assert_eq!(table.retrieve(&alice.key()), None);
    }
}
