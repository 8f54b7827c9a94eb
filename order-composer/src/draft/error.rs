use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Requests the draft refuses, plus ledger consistency failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("A product must be selected")]
    ProductRequired,

    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i32),

    #[error("quantity exceeds maximum allowed ({max}), got {quantity}")]
    QuantityTooLarge { quantity: i32, max: i32 },

    #[error(
        "credit ledger drift on product {product_id}: loaded {original}, remaining {remaining}, covered {covered}"
    )]
    LedgerDrift {
        product_id: i64,
        original: i32,
        remaining: i32,
        covered: i32,
    },
}

impl DraftError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DraftError::ProductRequired => ErrorCode::ProductRequired,
            DraftError::InvalidQuantity(_) => ErrorCode::InvalidQuantity,
            DraftError::QuantityTooLarge { .. } => ErrorCode::QuantityTooLarge,
            DraftError::LedgerDrift { .. } => ErrorCode::LedgerDrift,
        }
    }
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}
