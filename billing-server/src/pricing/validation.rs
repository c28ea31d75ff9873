//! Input validation before calculation
//!
//! The calculator itself accepts anything. This module is the boundary that
//! decides what reaches it:
//! - [`InputPolicy::Strict`] rejects non-finite or out-of-range values with a
//!   [`ValidationError`] naming the field and line.
//! - [`InputPolicy::Lenient`] keeps the billing screens' legacy behaviour of
//!   `parseFloat(x) || 0`: every unreadable value silently becomes zero.

use serde::{Deserialize, Serialize};
use shared::billing::{BillingDocument, ChargeSet, EnteredLine, LineItem, ProductDims, UnitMode};
use shared::error::{AppError, ErrorCode};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum allowed price per unit
pub const MAX_PRICE: f64 = 100_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: f64 = 1_000_000.0;
/// Maximum allowed document charge
pub const MAX_CHARGE: f64 = 100_000_000.0;
/// Maximum number of lines on one document
pub const MAX_LINE_ITEMS: usize = 1000;

/// How unreadable numeric input is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Reject with a validation error
    #[default]
    Strict,
    /// Coerce to zero, as the legacy screens did
    Lenient,
}

impl FromStr for InputPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(format!("unknown input policy: {other}")),
        }
    }
}

impl fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

/// Where an invalid value was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Document,
    Line(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::Line(index) => write!(f, "line {index}"),
        }
    }
}

/// Rejected billing input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{location}: {field} must be a finite number")]
    NotFinite {
        location: Location,
        field: &'static str,
    },

    #[error("{location}: {field} must be positive, got {value}")]
    NotPositive {
        location: Location,
        field: &'static str,
        value: f64,
    },

    #[error("{location}: {field} must be non-negative, got {value}")]
    Negative {
        location: Location,
        field: &'static str,
        value: f64,
    },

    #[error("{location}: {field} exceeds maximum allowed ({max}), got {value}")]
    TooLarge {
        location: Location,
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("{location}: gstRate must be between 0 and 100, got {value}")]
    TaxRateOutOfRange { location: Location, value: f64 },

    #[error("document has {count} line items, maximum is {max}")]
    TooManyLines { count: usize, max: usize },
}

impl ValidationError {
    /// Wire name of the offending field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NotFinite { field, .. }
            | Self::NotPositive { field, .. }
            | Self::Negative { field, .. }
            | Self::TooLarge { field, .. } => Some(field),
            Self::TaxRateOutOfRange { .. } => Some("gstRate"),
            Self::TooManyLines { .. } => None,
        }
    }

    /// Index of the offending line, if the error is line-specific
    pub fn line(&self) -> Option<usize> {
        let location = match self {
            Self::NotFinite { location, .. }
            | Self::NotPositive { location, .. }
            | Self::Negative { location, .. }
            | Self::TooLarge { location, .. }
            | Self::TaxRateOutOfRange { location, .. } => location,
            Self::TooManyLines { .. } => return None,
        };
        match location {
            Location::Line(index) => Some(*index),
            Location::Document => None,
        }
    }

    /// Error code reported to API clients
    pub fn error_code(&self) -> ErrorCode {
        if let Self::TooManyLines { .. } = self {
            return ErrorCode::TooManyLines;
        }
        if let Self::TaxRateOutOfRange { .. } = self {
            return ErrorCode::InvalidTaxRate;
        }
        match self.field() {
            Some("quantity") => ErrorCode::InvalidQuantity,
            Some("sellingPriceinQty" | "price") => ErrorCode::InvalidPrice,
            Some("gstRate") => ErrorCode::InvalidTaxRate,
            Some("length" | "breadth" | "psRatio") => ErrorCode::InvalidDimension,
            Some(_) if self.line().is_none() => ErrorCode::InvalidCharge,
            _ => ErrorCode::ValidationFailed,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let mut app = AppError::with_message(err.error_code(), err.to_string());
        if let Some(field) = err.field() {
            app = app.with_detail("field", field);
        }
        if let Some(line) = err.line() {
            app = app.with_detail("line", line);
        }
        app
    }
}

// ==================== Field checks ====================

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, location: Location, field: &'static str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { location, field });
    }
    Ok(())
}

fn require_non_negative(
    value: f64,
    max: f64,
    location: Location,
    field: &'static str,
) -> Result<(), ValidationError> {
    require_finite(value, location, field)?;
    if value < 0.0 {
        return Err(ValidationError::Negative {
            location,
            field,
            value,
        });
    }
    if value > max {
        return Err(ValidationError::TooLarge {
            location,
            field,
            value,
            max,
        });
    }
    Ok(())
}

fn require_positive(
    value: f64,
    max: f64,
    location: Location,
    field: &'static str,
) -> Result<(), ValidationError> {
    require_finite(value, location, field)?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive {
            location,
            field,
            value,
        });
    }
    if value > max {
        return Err(ValidationError::TooLarge {
            location,
            field,
            value,
            max,
        });
    }
    Ok(())
}

fn require_tax_rate(value: f64, location: Location) -> Result<(), ValidationError> {
    require_finite(value, location, "gstRate")?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::TaxRateOutOfRange { location, value });
    }
    Ok(())
}

// ==================== Strict validation ====================

/// Validate a calculator line item
///
/// Quantity must be positive, price non-negative (free items are allowed),
/// GST rate within 0-100.
pub fn validate_line_item(index: usize, item: &LineItem) -> Result<(), ValidationError> {
    let location = Location::Line(index);
    require_positive(item.quantity, MAX_QUANTITY, location, "quantity")?;
    require_non_negative(
        item.unit_price_inclusive_of_gst,
        MAX_PRICE,
        location,
        "sellingPriceinQty",
    )?;
    require_tax_rate(item.gst_rate_percent, location)?;
    Ok(())
}

/// Validate document charges (all non-negative; round-off direction comes from its mode)
pub fn validate_charges(charges: &ChargeSet) -> Result<(), ValidationError> {
    let location = Location::Document;
    require_non_negative(charges.discount_total, MAX_CHARGE, location, "discount")?;
    require_non_negative(charges.transportation, MAX_CHARGE, location, "transportation")?;
    require_non_negative(charges.unloading, MAX_CHARGE, location, "unloading")?;
    require_non_negative(charges.handling_charge, MAX_CHARGE, location, "handlingCharge")?;
    require_non_negative(charges.round_off, MAX_CHARGE, location, "roundOff")?;
    Ok(())
}

/// Validate a line as entered, including the dimensions its unit mode uses
pub fn validate_entered_line(index: usize, line: &EnteredLine) -> Result<(), ValidationError> {
    let location = Location::Line(index);
    require_positive(line.quantity, MAX_QUANTITY, location, "quantity")?;
    require_non_negative(line.price, MAX_PRICE, location, "price")?;
    require_tax_rate(line.gst_rate, location)?;
    require_positive(line.dims.length, MAX_QUANTITY, location, "length")?;
    require_positive(line.dims.breadth, MAX_QUANTITY, location, "breadth")?;
    if line.unit_mode == UnitMode::Box {
        require_positive(line.dims.ps_ratio, MAX_QUANTITY, location, "psRatio")?;
    }
    Ok(())
}

fn validate_line_count(count: usize) -> Result<(), ValidationError> {
    if count > MAX_LINE_ITEMS {
        return Err(ValidationError::TooManyLines {
            count,
            max: MAX_LINE_ITEMS,
        });
    }
    Ok(())
}

/// Validate a whole document: line count, every line, then the charges
pub fn validate_document(document: &BillingDocument) -> Result<(), ValidationError> {
    validate_line_count(document.line_items.len())?;
    for (index, item) in document.line_items.iter().enumerate() {
        validate_line_item(index, item)?;
    }
    validate_charges(&document.charges)
}

// ==================== Lenient coercion ====================

/// `parseFloat(x) || 0`: non-finite values become zero
#[inline]
fn or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn sanitize_line_item(item: LineItem) -> LineItem {
    LineItem {
        quantity: or_zero(item.quantity),
        unit_price_inclusive_of_gst: or_zero(item.unit_price_inclusive_of_gst),
        gst_rate_percent: or_zero(item.gst_rate_percent),
        ..item
    }
}

fn sanitize_charges(charges: ChargeSet) -> ChargeSet {
    ChargeSet {
        discount_total: or_zero(charges.discount_total),
        transportation: or_zero(charges.transportation),
        unloading: or_zero(charges.unloading),
        handling_charge: or_zero(charges.handling_charge),
        round_off: or_zero(charges.round_off),
        round_off_mode: charges.round_off_mode,
    }
}

/// Zero every unreadable number in a document
pub fn sanitize_document(document: BillingDocument) -> BillingDocument {
    BillingDocument {
        line_items: document
            .line_items
            .into_iter()
            .map(sanitize_line_item)
            .collect(),
        charges: sanitize_charges(document.charges),
        ..document
    }
}

/// Zero every unreadable number in an entered line
pub fn sanitize_entered_line(line: EnteredLine) -> EnteredLine {
    EnteredLine {
        quantity: or_zero(line.quantity),
        price: or_zero(line.price),
        gst_rate: or_zero(line.gst_rate),
        dims: ProductDims {
            length: or_zero(line.dims.length),
            breadth: or_zero(line.dims.breadth),
            ps_ratio: or_zero(line.dims.ps_ratio),
        },
        ..line
    }
}

// ==================== Policy entry points ====================

/// Apply the input policy to a document before calculation
pub fn prepare_document(
    document: BillingDocument,
    policy: InputPolicy,
) -> Result<BillingDocument, ValidationError> {
    match policy {
        InputPolicy::Strict => {
            validate_document(&document)?;
            Ok(document)
        }
        InputPolicy::Lenient => {
            // Line count is a resource limit, not a parsing concern
            validate_line_count(document.line_items.len())?;
            Ok(sanitize_document(document))
        }
    }
}

/// Apply the input policy to entered lines before unit conversion
pub fn prepare_entered_lines(
    lines: Vec<EnteredLine>,
    policy: InputPolicy,
) -> Result<Vec<EnteredLine>, ValidationError> {
    validate_line_count(lines.len())?;
    match policy {
        InputPolicy::Strict => {
            for (index, line) in lines.iter().enumerate() {
                validate_entered_line(index, line)?;
            }
            Ok(lines)
        }
        InputPolicy::Lenient => Ok(lines.into_iter().map(sanitize_entered_line).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::billing::RoundOffMode;

    fn doc(items: Vec<LineItem>, charges: ChargeSet) -> BillingDocument {
        BillingDocument::new(items, charges)
    }

    #[test]
    fn test_valid_document_passes() {
        let d = doc(
            vec![LineItem::new(10.0, 118.0, 18.0), LineItem::new(1.0, 0.0, 0.0)],
            ChargeSet {
                transportation: 50.0,
                ..Default::default()
            },
        );
        assert!(validate_document(&d).is_ok());
    }

    #[test]
    fn test_nan_quantity_rejected() {
        let err = validate_line_item(3, &LineItem::new(f64::NAN, 10.0, 5.0)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotFinite {
                location: Location::Line(3),
                field: "quantity"
            }
        );
        assert_eq!(err.error_code(), ErrorCode::InvalidQuantity);
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.to_string(), "line 3: quantity must be a finite number");
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = validate_line_item(0, &LineItem::new(0.0, 10.0, 5.0)).unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { field: "quantity", .. }));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = validate_line_item(1, &LineItem::new(1.0, -10.0, 5.0)).unwrap_err();
        assert_eq!(err.field(), Some("sellingPriceinQty"));
        assert_eq!(err.error_code(), ErrorCode::InvalidPrice);
    }

    #[test]
    fn test_price_over_max_rejected() {
        let err = validate_line_item(0, &LineItem::new(1.0, MAX_PRICE * 2.0, 5.0)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));
    }

    #[test]
    fn test_gst_rate_range() {
        assert!(validate_line_item(0, &LineItem::new(1.0, 10.0, 0.0)).is_ok());
        assert!(validate_line_item(0, &LineItem::new(1.0, 10.0, 100.0)).is_ok());

        let err = validate_line_item(0, &LineItem::new(1.0, 10.0, -5.0)).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::InvalidTaxRate);

        let err = validate_line_item(0, &LineItem::new(1.0, 10.0, 128.0)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TaxRateOutOfRange {
                location: Location::Line(0),
                value: 128.0
            }
        );
    }

    #[test]
    fn test_negative_charge_rejected() {
        let charges = ChargeSet {
            handling_charge: -1.0,
            ..Default::default()
        };
        let err = validate_charges(&charges).unwrap_err();
        assert_eq!(err.field(), Some("handlingCharge"));
        assert_eq!(err.line(), None);
        assert_eq!(err.error_code(), ErrorCode::InvalidCharge);
        assert_eq!(
            err.to_string(),
            "document: handlingCharge must be non-negative, got -1"
        );
    }

    #[test]
    fn test_discount_above_gross_is_accepted() {
        // Negative line bases are an accepted calculation outcome, not an input error
        let d = doc(
            vec![LineItem::new(1.0, 10.0, 18.0)],
            ChargeSet {
                discount_total: 50.0,
                ..Default::default()
            },
        );
        assert!(validate_document(&d).is_ok());
    }

    #[test]
    fn test_too_many_lines() {
        let items = vec![LineItem::new(1.0, 1.0, 0.0); MAX_LINE_ITEMS + 1];
        let err = validate_document(&doc(items, ChargeSet::default())).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::TooManyLines);
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_entered_line_dimensions() {
        let ok = EnteredLine::new(12.0, 100.0, 18.0, UnitMode::Sqft, ProductDims::new(2.0, 3.0, 0.0));
        assert!(validate_entered_line(0, &ok).is_ok());

        let bad_box = EnteredLine::new(2.0, 100.0, 18.0, UnitMode::Box, ProductDims::new(2.0, 3.0, 0.0));
        let err = validate_entered_line(4, &bad_box).unwrap_err();
        assert_eq!(err.field(), Some("psRatio"));
        assert_eq!(err.error_code(), ErrorCode::InvalidDimension);

        let bad_len = EnteredLine::new(2.0, 100.0, 18.0, UnitMode::Sqft, ProductDims::new(0.0, 3.0, 1.0));
        assert_eq!(validate_entered_line(0, &bad_len).unwrap_err().field(), Some("length"));
    }

    #[test]
    fn test_lenient_zeroes_unreadable_values() {
        let d = doc(
            vec![LineItem::new(f64::NAN, 118.0, f64::NAN)],
            ChargeSet {
                discount_total: f64::NAN,
                transportation: f64::INFINITY,
                round_off: 0.4,
                round_off_mode: RoundOffMode::Sub,
                ..Default::default()
            },
        );
        let prepared = prepare_document(d, InputPolicy::Lenient).unwrap();
        assert_eq!(prepared.line_items[0].quantity, 0.0);
        assert_eq!(prepared.line_items[0].unit_price_inclusive_of_gst, 118.0);
        assert_eq!(prepared.line_items[0].gst_rate_percent, 0.0);
        assert_eq!(prepared.charges.discount_total, 0.0);
        assert_eq!(prepared.charges.transportation, 0.0);
        assert_eq!(prepared.charges.round_off, 0.4);
        assert_eq!(prepared.charges.round_off_mode, RoundOffMode::Sub);
    }

    #[test]
    fn test_lenient_keeps_negative_values() {
        // parseFloat("-5") || 0 is still -5
        let d = doc(vec![LineItem::new(-5.0, 10.0, 18.0)], ChargeSet::default());
        let prepared = prepare_document(d, InputPolicy::Lenient).unwrap();
        assert_eq!(prepared.line_items[0].quantity, -5.0);
    }

    #[test]
    fn test_strict_prepare_rejects() {
        let d = doc(vec![LineItem::new(f64::NAN, 10.0, 18.0)], ChargeSet::default());
        assert!(prepare_document(d, InputPolicy::Strict).is_err());
    }

    #[test]
    fn test_prepare_entered_lines() {
        let lines = vec![EnteredLine::new(
            f64::NAN,
            10.0,
            5.0,
            UnitMode::Sqft,
            ProductDims::new(f64::NAN, 2.0, 1.0),
        )];
        assert!(prepare_entered_lines(lines.clone(), InputPolicy::Strict).is_err());

        let sanitized = prepare_entered_lines(lines, InputPolicy::Lenient).unwrap();
        assert_eq!(sanitized[0].quantity, 0.0);
        assert_eq!(sanitized[0].dims.length, 0.0);
    }

    #[test]
    fn test_validation_error_into_app_error() {
        let err = ValidationError::NotPositive {
            location: Location::Line(2),
            field: "quantity",
            value: 0.0,
        };
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InvalidQuantity);
        let details = app.details.unwrap();
        assert_eq!(details["field"], "quantity");
        assert_eq!(details["line"], 2);
    }

    #[test]
    fn test_input_policy_parse() {
        assert_eq!("strict".parse::<InputPolicy>(), Ok(InputPolicy::Strict));
        assert_eq!(" Lenient ".parse::<InputPolicy>(), Ok(InputPolicy::Lenient));
        assert!("loose".parse::<InputPolicy>().is_err());
        assert_eq!(InputPolicy::default(), InputPolicy::Strict);
        assert_eq!(InputPolicy::Lenient.to_string(), "lenient");
    }
}
