//! Ordered line storage for a draft order

use shared::OrderLine;
use shared::util::snowflake_after;
use std::collections::HashMap;

/// Lines in the order the user added them
///
/// Covered lines are tagged with the ledger generation they consumed
/// from; removal only restores credit into that same generation.
#[derive(Debug, Default)]
pub struct LineStore {
    lines: Vec<OrderLine>,
    /// line id -> ledger generation (covered lines only)
    coverage: HashMap<i64, u64>,
    last_id: i64,
}

impl LineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh line id, strictly increasing within the store
    pub fn next_id(&mut self) -> i64 {
        let id = snowflake_after(self.last_id);
        self.last_id = id;
        id
    }

    pub fn push(&mut self, line: OrderLine) {
        self.lines.push(line);
    }

    pub fn push_covered(&mut self, line: OrderLine, generation: u64) {
        self.coverage.insert(line.id, generation);
        self.lines.push(line);
    }

    /// Remove by id, returning the line and the generation it drew from
    pub fn remove(&mut self, line_id: i64) -> Option<(OrderLine, Option<u64>)> {
        let pos = self.lines.iter().position(|l| l.id == line_id)?;
        let line = self.lines.remove(pos);
        let generation = self.coverage.remove(&line.id);
        Some((line, generation))
    }

    /// Id of the first line equal on (product, quantity, price list, notes)
    pub fn find_matching(
        &self,
        product_id: i64,
        quantity: i32,
        price_list_id: Option<i64>,
        notes: Option<&str>,
    ) -> Option<i64> {
        self.lines
            .iter()
            .find(|l| l.matches(product_id, quantity, price_list_id, notes))
            .map(|l| l.id)
    }

    /// Covered quantity per product drawn from `generation`
    pub fn covered_by_product(&self, generation: u64) -> HashMap<i64, i32> {
        let mut covered = HashMap::new();
        for line in &self.lines {
            if self.coverage.get(&line.id) == Some(&generation) {
                *covered.entry(line.product_id).or_insert(0) += line.quantity;
            }
        }
        covered
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.coverage.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::ProductInfo;

    fn priced(id: i64, product_id: i64, quantity: i32) -> OrderLine {
        OrderLine::priced(
            id,
            &ProductInfo::unknown(product_id),
            quantity,
            Some(1),
            Decimal::ONE,
            Decimal::from(quantity),
            None,
        )
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut store = LineStore::new();
        let mut last = 0;
        for _ in 0..500 {
            let id = store.next_id();
            assert!(id > last);
            last = id;
        }
    }

    #[test]
    fn test_remove_by_id_keeps_order() {
        let mut store = LineStore::new();
        store.push(priced(1, 5, 1));
        store.push(priced(2, 5, 1));
        store.push(priced(3, 6, 2));

        let (removed, generation) = store.remove(2).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(generation, None);
        let ids: Vec<i64> = store.lines().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(store.remove(2).is_none());
    }

    #[test]
    fn test_find_matching_returns_first() {
        let mut store = LineStore::new();
        store.push(priced(1, 5, 2));
        store.push(priced(2, 5, 2));
        assert_eq!(store.find_matching(5, 2, Some(1), None), Some(1));
        assert_eq!(store.find_matching(5, 3, Some(1), None), None);
    }

    #[test]
    fn test_covered_by_product_filters_generation() {
        let mut store = LineStore::new();
        let product = ProductInfo::unknown(5);
        store.push_covered(OrderLine::covered(1, &product, 2, 9, None), 1);
        store.push_covered(OrderLine::covered(2, &product, 3, 9, None), 2);
        store.push_covered(OrderLine::covered(3, &product, 1, 9, None), 2);

        assert_eq!(store.covered_by_product(2).get(&5), Some(&4));
        assert_eq!(store.covered_by_product(1).get(&5), Some(&2));
        assert!(store.covered_by_product(3).is_empty());
    }
}
