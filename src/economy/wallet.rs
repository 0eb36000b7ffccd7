//! Faction wallets - the campaign resource ledger

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, ResourceId};

/// Per-faction resource balances
///
/// Balances are signed and may go negative (cursed worlds and debuffs
/// drain rather than pay). A missing entry reads as zero. The wallet
/// performs no validation of its own; affordability checks belong to
/// the transaction engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    balances: AHashMap<FactionId, AHashMap<ResourceId, i64>>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance; unknown factions and resources read as 0
    pub fn get(&self, faction: FactionId, resource: &ResourceId) -> i64 {
        self.balances
            .get(&faction)
            .and_then(|ledger| ledger.get(resource))
            .copied()
            .unwrap_or(0)
    }

    /// Add to a balance (negative amounts allowed)
    pub fn credit(&mut self, faction: FactionId, resource: &ResourceId, amount: i64) {
        let ledger = self.balances.entry(faction).or_default();
        *ledger.entry(resource.clone()).or_insert(0) += amount;
    }

    /// Subtract from a balance, without any affordability check
    pub fn debit(&mut self, faction: FactionId, resource: &ResourceId, amount: i64) {
        self.credit(faction, resource, -amount);
    }

    /// Whether every cost entry is covered by the current balance
    pub fn can_afford(&self, faction: FactionId, cost: &[(ResourceId, i64)]) -> bool {
        cost.iter()
            .all(|(resource, amount)| self.get(faction, resource) >= *amount)
    }

    /// Balances of one faction, for display
    pub fn balances_for(&self, faction: FactionId) -> Vec<(&ResourceId, i64)> {
        self.balances
            .get(&faction)
            .map(|ledger| ledger.iter().map(|(r, a)| (r, *a)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(id: &str) -> ResourceId {
        ResourceId::from(id)
    }

    #[test]
    fn test_missing_entries_read_zero() {
        let wallet = Wallet::new();
        assert_eq!(wallet.get(FactionId(1), &res("requisition")), 0);
    }

    #[test]
    fn test_credit_and_debit() {
        let mut wallet = Wallet::new();
        wallet.credit(FactionId(1), &res("requisition"), 10);
        wallet.debit(FactionId(1), &res("requisition"), 4);
        assert_eq!(wallet.get(FactionId(1), &res("requisition")), 6);
    }

    #[test]
    fn test_balances_may_go_negative() {
        let mut wallet = Wallet::new();
        wallet.debit(FactionId(1), &res("requisition"), 5);
        assert_eq!(wallet.get(FactionId(1), &res("requisition")), -5);
    }

    #[test]
    fn test_can_afford() {
        let mut wallet = Wallet::new();
        wallet.credit(FactionId(1), &res("requisition"), 3);
        wallet.credit(FactionId(1), &res("materiel"), 1);

        assert!(wallet.can_afford(FactionId(1), &[(res("requisition"), 3)]));
        assert!(wallet.can_afford(
            FactionId(1),
            &[(res("requisition"), 3), (res("materiel"), 1)]
        ));
        assert!(!wallet.can_afford(FactionId(1), &[(res("requisition"), 4)]));
        // Missing balances are treated as zero
        assert!(!wallet.can_afford(FactionId(1), &[(res("promethium"), 1)]));
        // Empty cost is always affordable
        assert!(wallet.can_afford(FactionId(2), &[]));
    }

    #[test]
    fn test_factions_are_isolated() {
        let mut wallet = Wallet::new();
        wallet.credit(FactionId(1), &res("requisition"), 10);
        assert_eq!(wallet.get(FactionId(2), &res("requisition")), 0);
    }
}
