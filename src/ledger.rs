//!
//! The in-memory index built by a scan: every registered transaction's
//! outputs, and received/sent totals per public-key hash.
//!

use crate::parser::proto::{AddressAccount, Hash160, Output, Txid};
use ahash::AHashMap;

///
/// The authoritative index populated by one sequential scan.
///
/// Two maps: transaction identity to its ordered output list, and
/// public-key hash to its running totals. Transaction entries are
/// written once and kept for the whole scan, because any later block
/// may spend an old output; nothing is ever pruned or persisted.
///
/// Spend resolution is a fresh lookup by key. Outputs store the owner
/// hash, never a reference into the account map, so the maps are free
/// to reorganize their storage.
///
/// Owned and mutated by the single scanning thread; concurrent readers
/// must synchronize externally.
///
#[derive(Default)]
pub struct Ledger {
    txns: AHashMap<Txid, Vec<Output>>,
    accounts: AHashMap<Hash160, AddressAccount>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger {
            txns: AHashMap::new(),
            accounts: AHashMap::new(),
        }
    }

    /// Register a fully decoded transaction's output list under its
    /// content hash. Insertion order of the list is output index order.
    pub(crate) fn record_transaction(&mut self, txid: Txid, outputs: Vec<Output>) {
        self.txns.insert(txid, outputs);
    }

    /// Resolve an input's `(prev_tx, prev_index)` reference. If the
    /// referenced output is known and owned, its owner is debited by
    /// the output's value; dangling or out-of-range references are
    /// silently ignored.
    pub(crate) fn resolve_spend(&mut self, prev_tx: &Txid, prev_index: u32) {
        let spent = self
            .txns
            .get(prev_tx)
            .and_then(|outputs| outputs.get(prev_index as usize))
            .and_then(|out| out.owner.map(|owner| (owner, out.value)));
        if let Some((owner, value)) = spent {
            self.debit_sent(&owner, value);
        }
    }

    /// Add to an owner's received total, creating the account on first
    /// touch.
    pub(crate) fn credit_received(&mut self, owner: &Hash160, value: u64) {
        self.accounts.entry(*owner).or_default().received += value;
    }

    /// Add to an owner's sent total, creating the account on first
    /// touch.
    pub(crate) fn debit_sent(&mut self, owner: &Hash160, value: u64) {
        self.accounts.entry(*owner).or_default().sent += value;
    }

    /// `received - sent` for this hash, 0 if it was never observed.
    /// Unsigned subtraction: a malformed chain that over-spends an
    /// address wraps rather than erroring.
    pub fn balance_of(&self, hash: &Hash160) -> u64 {
        match self.accounts.get(hash) {
            Some(account) => account.balance(),
            None => 0,
        }
    }

    /// Whether this hash was ever observed as an output owner.
    pub fn is_known(&self, hash: &Hash160) -> bool {
        self.accounts.contains_key(hash)
    }

    pub fn account(&self, hash: &Hash160) -> Option<AddressAccount> {
        self.accounts.get(hash).copied()
    }

    /// All accounts in no particular order, for dumps and batch
    /// cross-checks.
    pub fn accounts(&self) -> impl Iterator<Item = (&Hash160, &AddressAccount)> {
        self.accounts.iter()
    }

    /// Output list of a registered transaction.
    pub fn outputs_of(&self, txid: &Txid) -> Option<&[Output]> {
        self.txns.get(txid).map(|outputs| outputs.as_slice())
    }

    pub fn address_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.txns.len()
    }
}
