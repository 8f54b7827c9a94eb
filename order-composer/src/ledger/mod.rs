//! Credit Ledger View
//!
//! In-memory snapshot of the remaining entitlement per product for the
//! subscription attached to a draft order. The authoritative ledger lives
//! on the server; this view is reloaded whenever the subscription changes
//! and mutated locally as covered lines come and go.
//!
//! Every load (or clear) starts a new *generation*. Covered lines remember
//! the generation they consumed from, so a line created before a reload
//! never restores credit into the fresh snapshot.

use crate::gateway::{LookupDiagnostic, LookupKind, SubscriptionGateway};
use shared::ProductCredit;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CreditLedgerView {
    subscription_id: Option<i64>,
    /// Entries in load order (legend order)
    entries: Vec<ProductCredit>,
    /// product_id -> position in `entries`
    index: HashMap<i64, usize>,
    /// Balances as loaded, for conservation checks and reset
    original: HashMap<i64, i32>,
    generation: u64,
}

impl CreditLedgerView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a view directly from credits (no gateway)
    pub fn from_credits(subscription_id: i64, credits: Vec<ProductCredit>) -> Self {
        let mut view = Self::new();
        view.replace(Some(subscription_id), credits);
        view
    }

    /// Full refresh from the subscription gateway
    ///
    /// A failed fetch leaves the view empty (no credits) and returns the
    /// diagnostic instead of an error.
    pub async fn load(
        &mut self,
        gateway: &dyn SubscriptionGateway,
        subscription_id: i64,
    ) -> Option<LookupDiagnostic> {
        match gateway.credits(subscription_id).await {
            Ok(credits) => {
                tracing::debug!(
                    subscription_id,
                    entries = credits.len(),
                    "Credit ledger loaded"
                );
                self.replace(Some(subscription_id), credits);
                None
            }
            Err(e) => {
                self.replace(Some(subscription_id), Vec::new());
                let diagnostic = LookupDiagnostic::from_error(LookupKind::Credits, None, &e);
                diagnostic.log();
                Some(diagnostic)
            }
        }
    }

    /// Drop the snapshot (no subscription selected)
    pub fn clear(&mut self) {
        self.replace(None, Vec::new());
    }

    fn replace(&mut self, subscription_id: Option<i64>, credits: Vec<ProductCredit>) {
        self.subscription_id = subscription_id;
        self.entries.clear();
        self.index.clear();
        self.original.clear();
        self.generation += 1;

        for credit in credits {
            let balance = credit.remaining_balance.max(0);
            // Duplicate product rows: keep the first one
            if self.index.contains_key(&credit.product_id) {
                tracing::warn!(product_id = credit.product_id, "Duplicate credit entry ignored");
                continue;
            }
            self.index.insert(credit.product_id, self.entries.len());
            self.original.insert(credit.product_id, balance);
            self.entries.push(ProductCredit {
                remaining_balance: balance,
                ..credit
            });
        }
    }

    /// Remaining balance of a product (0 if absent)
    pub fn get(&self, product_id: i64) -> i32 {
        self.index
            .get(&product_id)
            .map(|&i| self.entries[i].remaining_balance)
            .unwrap_or(0)
    }

    /// Balance as loaded, before any local consumption
    pub fn original(&self, product_id: i64) -> i32 {
        self.original.get(&product_id).copied().unwrap_or(0)
    }

    /// Adjust one entry by `delta` (negative consumes, positive restores)
    ///
    /// The result is clamped at 0. Products without an entry are left
    /// alone and report 0.
    pub fn apply(&mut self, product_id: i64, delta: i32) -> i32 {
        let Some(&i) = self.index.get(&product_id) else {
            if delta != 0 {
                tracing::warn!(product_id, delta, "Ledger apply on product without credit entry");
            }
            return 0;
        };

        let entry = &mut self.entries[i];
        let raw = entry.remaining_balance.saturating_add(delta);
        if raw < 0 {
            tracing::warn!(
                product_id,
                delta,
                balance = entry.remaining_balance,
                "Ledger apply clamped at zero"
            );
        }
        entry.remaining_balance = raw.max(0);
        tracing::debug!(product_id, delta, balance = entry.remaining_balance, "Ledger apply");
        entry.remaining_balance
    }

    /// Put every balance back to its loaded value (same generation)
    pub fn restore_original(&mut self) {
        for entry in &mut self.entries {
            entry.remaining_balance = self.original.get(&entry.product_id).copied().unwrap_or(0);
        }
    }

    pub fn subscription_id(&self) -> Option<i64> {
        self.subscription_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current snapshot in load order
    pub fn entries(&self) -> &[ProductCredit] {
        &self.entries
    }

    /// Current snapshot as a product -> balance mapping
    pub fn balances(&self) -> HashMap<i64, i32> {
        self.entries
            .iter()
            .map(|e| (e.product_id, e.remaining_balance))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::InMemoryGateway;

    fn view() -> CreditLedgerView {
        CreditLedgerView::from_credits(
            1,
            vec![
                ProductCredit::new(10, "Water 20L", 3),
                ProductCredit::new(11, "Soda 2L", 1),
            ],
        )
    }

    #[test]
    fn test_get_absent_is_zero() {
        let view = view();
        assert_eq!(view.get(10), 3);
        assert_eq!(view.get(99), 0);
    }

    #[test]
    fn test_apply_consume_and_restore() {
        let mut view = view();
        assert_eq!(view.apply(10, -2), 1);
        assert_eq!(view.apply(10, 2), 3);
        assert_eq!(view.original(10), 3);
    }

    #[test]
    fn test_apply_clamps_at_zero() {
        let mut view = view();
        assert_eq!(view.apply(11, -5), 0);
        assert_eq!(view.get(11), 0);
    }

    #[test]
    fn test_apply_absent_product_is_noop() {
        let mut view = view();
        assert_eq!(view.apply(99, 4), 0);
        assert_eq!(view.get(99), 0);
        assert_eq!(view.entries().len(), 2);
    }

    #[test]
    fn test_negative_loaded_balance_is_clamped() {
        let view = CreditLedgerView::from_credits(
            1,
            vec![ProductCredit {
                product_id: 5,
                description: "Odd".to_string(),
                remaining_balance: -3,
            }],
        );
        assert_eq!(view.get(5), 0);
        assert_eq!(view.original(5), 0);
    }

    #[test]
    fn test_restore_original() {
        let mut view = view();
        view.apply(10, -3);
        view.apply(11, -1);
        let generation = view.generation();

        view.restore_original();
        assert_eq!(view.get(10), 3);
        assert_eq!(view.get(11), 1);
        assert_eq!(view.generation(), generation);
    }

    #[test]
    fn test_clear_bumps_generation() {
        let mut view = view();
        let generation = view.generation();
        view.clear();
        assert!(view.is_empty());
        assert_eq!(view.subscription_id(), None);
        assert!(view.generation() > generation);
    }

    #[tokio::test]
    async fn test_load_replaces_snapshot() {
        let gateway = InMemoryGateway::new()
            .with_credits(2, vec![ProductCredit::new(20, "Ice 5kg", 6)]);
        let mut view = view();

        let diagnostic = view.load(&gateway, 2).await;
        assert!(diagnostic.is_none());
        assert_eq!(view.subscription_id(), Some(2));
        assert_eq!(view.get(10), 0);
        assert_eq!(view.get(20), 6);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_view_empty() {
        let gateway = InMemoryGateway::new();
        gateway.fail_credits(true);
        let mut view = view();

        let diagnostic = view.load(&gateway, 1).await.unwrap();
        assert_eq!(diagnostic.kind, LookupKind::Credits);
        assert!(view.is_empty());
        assert_eq!(view.get(10), 0);
        assert_eq!(view.subscription_id(), Some(1));
    }
}
