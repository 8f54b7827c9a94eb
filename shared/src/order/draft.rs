//! Draft order header and submission payload

use super::line::{LineSource, OrderLine};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of order being composed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    /// Delivery under a plan subscription; may draw from credits
    #[default]
    Subscription,
    /// One-off purchase; every unit is priced
    OneOff,
}

impl OrderKind {
    /// Whether this kind of order may consume subscription credits
    #[inline]
    pub fn permits_entitlement(&self) -> bool {
        matches!(self, OrderKind::Subscription)
    }
}

/// Scalar header fields of a draft order
///
/// `total_amount` and `paid_amount` are derived from the lines and are
/// rewritten after every add/remove.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DraftOrderHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<i64>,
    pub kind: OrderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    /// When false, `paid_amount` mirrors `total_amount`
    #[serde(default)]
    pub allows_partial_payment: bool,
}

/// One entry of the order-creation payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionItem {
    pub product_id: i64,
    pub quantity: i32,
    /// None for covered lines
    pub price_list_id: Option<i64>,
}

impl From<&OrderLine> for SubmissionItem {
    fn from(line: &OrderLine) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
            price_list_id: match line.source {
                LineSource::Covered => None,
                LineSource::Priced => line.price_list_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductInfo;

    #[test]
    fn test_kind_entitlement() {
        assert!(OrderKind::Subscription.permits_entitlement());
        assert!(!OrderKind::OneOff.permits_entitlement());
        assert_eq!(OrderKind::default(), OrderKind::Subscription);
    }

    #[test]
    fn test_submission_item_from_lines() {
        let product = ProductInfo::unknown(4);
        let covered = OrderLine::covered(1, &product, 3, 9, None);
        let priced = OrderLine::priced(
            2,
            &product,
            2,
            Some(11),
            Decimal::ONE,
            Decimal::new(2, 0),
            None,
        );

        assert_eq!(
            SubmissionItem::from(&covered),
            SubmissionItem {
                product_id: 4,
                quantity: 3,
                price_list_id: None
            }
        );
        assert_eq!(SubmissionItem::from(&priced).price_list_id, Some(11));
    }

    #[test]
    fn test_header_serializes_kind() {
        let header = DraftOrderHeader {
            kind: OrderKind::OneOff,
            ..Default::default()
        };
        let json = serde_json::to_value(&header).unwrap();
        assert_eq!(json["kind"], "ONE_OFF");
        assert_eq!(json["total_amount"], "0");
    }
}
