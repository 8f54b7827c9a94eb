//! Entitlement legend
//!
//! Human-readable summary of the credits still available. Reads the
//! already-adjusted ledger snapshot and nothing else; balances are never
//! re-derived from the draft's lines.

use crate::ledger::CreditLedgerView;

/// Shown when the subscription has credit entries but all are used up
pub const NO_CREDITS_AVAILABLE: &str = "No credits available";

/// `"<description>: <remaining>"` for every product with balance left
///
/// `None` when no subscription is selected or the ledger is empty.
pub fn format_legend(ledger: &CreditLedgerView) -> Option<String> {
    if ledger.subscription_id().is_none() || ledger.is_empty() {
        return None;
    }

    let parts: Vec<String> = ledger
        .entries()
        .iter()
        .filter(|e| e.remaining_balance > 0)
        .map(|e| {
            if e.description.is_empty() {
                format!("#{}: {}", e.product_id, e.remaining_balance)
            } else {
                format!("{}: {}", e.description, e.remaining_balance)
            }
        })
        .collect();

    if parts.is_empty() {
        Some(NO_CREDITS_AVAILABLE.to_string())
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ProductCredit;

    #[test]
    fn test_lists_positive_balances_in_load_order() {
        let ledger = CreditLedgerView::from_credits(
            1,
            vec![
                ProductCredit::new(2, "Water 20L", 3),
                ProductCredit::new(1, "Soda 2L", 0),
                ProductCredit::new(3, "Ice 5kg", 1),
            ],
        );
        assert_eq!(
            format_legend(&ledger).as_deref(),
            Some("Water 20L: 3, Ice 5kg: 1")
        );
    }

    #[test]
    fn test_depleted_ledger_uses_sentinel() {
        let mut ledger =
            CreditLedgerView::from_credits(1, vec![ProductCredit::new(2, "Water 20L", 2)]);
        ledger.apply(2, -2);
        assert_eq!(format_legend(&ledger).as_deref(), Some(NO_CREDITS_AVAILABLE));
    }

    #[test]
    fn test_none_without_subscription_or_entries() {
        assert_eq!(format_legend(&CreditLedgerView::new()), None);

        let empty = CreditLedgerView::from_credits(1, vec![]);
        assert_eq!(format_legend(&empty), None);
    }

    #[test]
    fn test_missing_description_falls_back_to_id() {
        let ledger = CreditLedgerView::from_credits(1, vec![ProductCredit::new(42, "", 5)]);
        assert_eq!(format_legend(&ledger).as_deref(), Some("#42: 5"));
    }

    #[test]
    fn test_reflects_adjusted_snapshot_once() {
        let mut ledger =
            CreditLedgerView::from_credits(1, vec![ProductCredit::new(2, "Water 20L", 5)]);
        ledger.apply(2, -2);
        assert_eq!(format_legend(&ledger).as_deref(), Some("Water 20L: 3"));
    }
}
