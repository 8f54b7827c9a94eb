//! Price List Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product's unit price within a price list
///
/// Prices travel as decimal strings ("2.50"); numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceListEntry {
    pub price_list_id: i64,
    pub product_id: i64,
    pub unit_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price_from_string_or_number() {
        let from_str: PriceListEntry =
            serde_json::from_str(r#"{"price_list_id":1,"product_id":2,"unit_price":"2.50"}"#)
                .unwrap();
        let from_num: PriceListEntry =
            serde_json::from_str(r#"{"price_list_id":1,"product_id":2,"unit_price":2.5}"#)
                .unwrap();
        assert_eq!(from_str.unit_price, Decimal::new(250, 2));
        assert_eq!(from_num.unit_price, from_str.unit_price);
    }
}
