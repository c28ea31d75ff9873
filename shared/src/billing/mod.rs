//! Billing types shared by the calculator, the HTTP API and its clients
//!
//! - [`LineItem`] / [`ChargeSet`]: calculator input
//! - [`Totals`] / [`LineBreakdown`]: calculator output
//! - [`EnteredLine`] / [`UnitMode`] / [`ProductDims`]: pre-conversion form input
//! - [`BillingDocument`]: one invoice or purchase as posted by the screens

pub mod document;
pub mod number;
pub mod types;
pub mod unit;

pub use document::{BillingDocument, DocumentKind, SupplyType};
pub use number::{lenient_f64, parse_float};
pub use types::{ChargeSet, LineBreakdown, LineItem, RoundOffMode, Totals};
pub use unit::{EnteredLine, ProductDims, UnitMode};
