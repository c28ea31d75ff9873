//! Unit Normalization
//!
//! Turns a quantity/price pair as typed on the billing screen into the
//! product's native stock unit before it reaches the calculator:
//!
//! | Mode | Quantity | Price |
//! |------|----------|-------|
//! | SQFT | `qty / area` | `price * area` |
//! | BOX | `qty * ps_ratio` | `price * area` |
//! | NOS / TNOS | unchanged | `price * area` |
//!
//! where `area = length * breadth`.

use shared::billing::{EnteredLine, LineItem, ProductDims, UnitMode};

/// Quantity/price pair in native stock units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    pub quantity: f64,
    pub price: f64,
}

/// Convert an entered quantity/price pair into native stock units
///
/// A non-positive or non-finite area (or box ratio) is treated as `1`, so the
/// conversion never divides by zero and degrades to a pass-through instead.
pub fn normalize(quantity: f64, price: f64, mode: UnitMode, dims: &ProductDims) -> Normalized {
    let area = positive_or_one(dims.area());

    match mode {
        UnitMode::Sqft => Normalized {
            quantity: quantity / area,
            price: price * area,
        },
        UnitMode::Box => Normalized {
            quantity: quantity * positive_or_one(dims.ps_ratio),
            price: price * area,
        },
        UnitMode::Nos | UnitMode::Tnos => Normalized {
            quantity,
            price: price * area,
        },
    }
}

/// Normalize one entered line into a calculator [`LineItem`]
pub fn normalize_unit(entered: &EnteredLine) -> LineItem {
    let Normalized { quantity, price } =
        normalize(entered.quantity, entered.price, entered.unit_mode, &entered.dims);

    LineItem {
        quantity,
        unit_price_inclusive_of_gst: price,
        gst_rate_percent: entered.gst_rate,
        product_name: entered.product_name.clone(),
        hsn_code: entered.hsn_code.clone(),
    }
}

/// Normalize every entered line, preserving order
pub fn normalize_lines(lines: &[EnteredLine]) -> Vec<LineItem> {
    lines.iter().map(normalize_unit).collect()
}

#[inline]
fn positive_or_one(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}
