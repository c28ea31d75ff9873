//! Shared types for the billing workspace
//!
//! Wire types for invoices and purchases, and the unified error/response
//! structures used by the HTTP API and its clients.

pub mod billing;
pub mod error;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use billing::{BillingDocument, ChargeSet, LineItem, Totals};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
