//! Allocator
//!
//! Greedy, product-local split of a requested quantity into the part
//! covered by credits and the part that must be priced. Pure: the ledger
//! is only read.

use crate::ledger::CreditLedgerView;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Allocation {
    pub covered: i32,
    pub extra: i32,
}

impl Allocation {
    /// Everything priced (no entitlement in play)
    pub fn priced(requested: i32) -> Self {
        Self {
            covered: 0,
            extra: requested.max(0),
        }
    }

    #[inline]
    pub fn total(&self) -> i32 {
        self.covered + self.extra
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// covered = min(requested, balance), extra = requested - covered
///
/// Non-positive requests allocate nothing; rejecting them is the caller's job.
pub fn allocate(ledger: &CreditLedgerView, product_id: i64, requested: i32) -> Allocation {
    if requested <= 0 {
        return Allocation::default();
    }
    let covered = requested.min(ledger.get(product_id).max(0));
    Allocation {
        covered,
        extra: requested - covered,
    }
}
