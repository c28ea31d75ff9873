//! GST Pricing Module
//!
//! - [`unit`]: converts entered quantity/price into native stock units
//! - [`validation`]: applies the input policy before calculation
//! - [`calculator`]: derives discount allocation, GST and totals

mod calculator;
pub mod unit;
pub mod validation;


pub use calculator::*;
pub use unit::{Normalized, normalize, normalize_lines, normalize_unit};
pub use validation::{InputPolicy, ValidationError, prepare_document, prepare_entered_lines};
