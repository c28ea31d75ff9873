//! Unified error codes for the billing services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Billing input errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 4xxx: Billing ====================
    /// Line quantity is not a positive finite number
    InvalidQuantity = 4001,
    /// Line price is negative or not a finite number
    InvalidPrice = 4002,
    /// GST rate is outside 0-100
    InvalidTaxRate = 4003,
    /// Document charge (discount, freight, round-off...) is invalid
    InvalidCharge = 4004,
    /// Product length/breadth/box ratio is invalid
    InvalidDimension = 4005,
    /// Document has more lines than allowed
    TooManyLines = 4006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
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

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidFormat => "Invalid format",

            // Billing
            ErrorCode::InvalidQuantity => "Quantity must be a positive number",
            ErrorCode::InvalidPrice => "Price must be a non-negative number",
            ErrorCode::InvalidTaxRate => "GST rate must be between 0 and 100",
            ErrorCode::InvalidCharge => "Document charge is invalid",
            ErrorCode::InvalidDimension => "Product dimensions are invalid",
            ErrorCode::TooManyLines => "Too many line items",

            // System
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
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
            2 => Ok(ErrorCode::ValidationFailed),
            6 => Ok(ErrorCode::InvalidFormat),

            // Billing
            4001 => Ok(ErrorCode::InvalidQuantity),
            4002 => Ok(ErrorCode::InvalidPrice),
            4003 => Ok(ErrorCode::InvalidTaxRate),
            4004 => Ok(ErrorCode::InvalidCharge),
            4005 => Ok(ErrorCode::InvalidDimension),
            4006 => Ok(ErrorCode::TooManyLines),

            // System
            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
