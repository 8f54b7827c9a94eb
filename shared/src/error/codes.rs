//! Unified error codes for the delivery console
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Subscription errors
//! - 4xxx: Order errors
//! - 6xxx: Product and price list errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the console front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Subscription ====================
    /// Subscription not found
    SubscriptionNotFound = 3101,

    // ==================== 4xxx: Order ====================
    /// Requested quantity is zero or negative
    InvalidQuantity = 4101,
    /// Requested quantity exceeds the per-line limit
    QuantityTooLarge = 4102,
    /// No product selected for the line
    ProductRequired = 4103,
    /// Credit ledger no longer matches the covered lines
    LedgerDrift = 4201,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Price list not found
    PriceListNotFound = 6901,
    /// Product has no entry in the price list
    PriceNotFound = 6902,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Operation timed out
    TimeoutError = 9004,
    /// Upstream returned a response that could not be decoded
    InvalidResponse = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::PermissionDenied => "Permission denied",

            // Subscription
            ErrorCode::SubscriptionNotFound => "Subscription not found",

            // Order
            ErrorCode::InvalidQuantity => "Quantity must be a positive integer",
            ErrorCode::QuantityTooLarge => "Quantity exceeds the maximum allowed per line",
            ErrorCode::ProductRequired => "A product must be selected",
            ErrorCode::LedgerDrift => "Credit ledger does not match covered lines",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::PriceListNotFound => "Price list not found",
            ErrorCode::PriceNotFound => "Product has no price in the price list",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::InvalidResponse => "Invalid response from server",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            2001 => Ok(ErrorCode::PermissionDenied),

            // Subscription
            3101 => Ok(ErrorCode::SubscriptionNotFound),

            // Order
            4101 => Ok(ErrorCode::InvalidQuantity),
            4102 => Ok(ErrorCode::QuantityTooLarge),
            4103 => Ok(ErrorCode::ProductRequired),
            4201 => Ok(ErrorCode::LedgerDrift),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6901 => Ok(ErrorCode::PriceListNotFound),
            6902 => Ok(ErrorCode::PriceNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9006 => Ok(ErrorCode::InvalidResponse),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);

        assert_eq!(ErrorCode::SubscriptionNotFound.code(), 3101);
        assert_eq!(ErrorCode::InvalidQuantity.code(), 4101);
        assert_eq!(ErrorCode::ProductRequired.code(), 4103);
        assert_eq!(ErrorCode::LedgerDrift.code(), 4201);

        assert_eq!(ErrorCode::ProductNotFound.code(), 6001);
        assert_eq!(ErrorCode::PriceNotFound.code(), 6902);

        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::InvalidResponse.code(), 9006);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::InvalidQuantity.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(3101), Ok(ErrorCode::SubscriptionNotFound));
        assert_eq!(ErrorCode::try_from(4102), Ok(ErrorCode::QuantityTooLarge));
        assert_eq!(ErrorCode::try_from(6901), Ok(ErrorCode::PriceListNotFound));
        assert_eq!(ErrorCode::try_from(9003), Ok(ErrorCode::NetworkError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_every_code_round_trips_through_u16() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::NotAuthenticated,
            ErrorCode::PermissionDenied,
            ErrorCode::SubscriptionNotFound,
            ErrorCode::InvalidQuantity,
            ErrorCode::QuantityTooLarge,
            ErrorCode::ProductRequired,
            ErrorCode::LedgerDrift,
            ErrorCode::ProductNotFound,
            ErrorCode::PriceListNotFound,
            ErrorCode::PriceNotFound,
            ErrorCode::InternalError,
            ErrorCode::NetworkError,
            ErrorCode::TimeoutError,
            ErrorCode::InvalidResponse,
        ];

        for code in codes {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::InvalidQuantity).unwrap();
        assert_eq!(json, "4101");

        let code: ErrorCode = serde_json::from_str("6902").unwrap();
        assert_eq!(code, ErrorCode::PriceNotFound);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::LedgerDrift), "4201");
        assert_eq!(
            format!("{}", InvalidErrorCode(999)),
            "invalid error code: 999"
        );
    }
}
