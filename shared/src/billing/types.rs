//! Line items, document charges and calculated totals

use super::number::lenient_f64;
use serde::{Deserialize, Serialize};

// ============================================================================
// Line Item
// ============================================================================

/// One product line of an invoice or purchase, already in its native stock unit.
///
/// Wire names follow the billing screens: `sellingPriceinQty` is the
/// GST-inclusive price per native unit, `gstRate` the GST percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Quantity in native stock units (after unit conversion)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
    /// GST-inclusive, pre-discount price per native unit
    #[serde(
        rename = "sellingPriceinQty",
        default,
        deserialize_with = "lenient_f64"
    )]
    pub unit_price_inclusive_of_gst: f64,
    /// GST percentage (e.g. 18 for 18%)
    #[serde(rename = "gstRate", default, deserialize_with = "lenient_f64")]
    pub gst_rate_percent: f64,
    /// Product name snapshot (payload/print only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// HSN classification code (payload/print only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
}

impl LineItem {
    pub fn new(quantity: f64, unit_price_inclusive_of_gst: f64, gst_rate_percent: f64) -> Self {
        Self {
            quantity,
            unit_price_inclusive_of_gst,
            gst_rate_percent,
            product_name: None,
            hsn_code: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn with_hsn(mut self, hsn: impl Into<String>) -> Self {
        self.hsn_code = Some(hsn.into());
        self
    }

    /// GST-inclusive value of the line before discount
    #[inline]
    pub fn gross_value(&self) -> f64 {
        self.quantity * self.unit_price_inclusive_of_gst
    }
}

// ============================================================================
// Charge Set
// ============================================================================

/// Direction of the final round-off adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoundOffMode {
    #[default]
    Add,
    Sub,
}

/// Document-level charges, applied once per invoice/purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSet {
    /// Absolute discount, spread over lines by gross-value share
    #[serde(rename = "discount", default, deserialize_with = "lenient_f64")]
    pub discount_total: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub transportation: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub unloading: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub handling_charge: f64,
    /// Magnitude of the round-off; the sign comes from `round_off_mode`
    #[serde(default, deserialize_with = "lenient_f64")]
    pub round_off: f64,
    #[serde(default)]
    pub round_off_mode: RoundOffMode,
}

impl ChargeSet {
    /// Charges added to the grand total untouched by GST or discount
    #[inline]
    pub fn fixed_charges(&self) -> f64 {
        self.transportation + self.unloading + self.handling_charge
    }

    /// Round-off with its sign applied
    #[inline]
    pub fn signed_round_off(&self) -> f64 {
        match self.round_off_mode {
            RoundOffMode::Add => self.round_off,
            RoundOffMode::Sub => -self.round_off,
        }
    }
}

// ============================================================================
// Totals
// ============================================================================

/// Per-line figures produced by the calculator, in input order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineBreakdown {
    /// quantity * GST-inclusive price
    pub item_gross: f64,
    /// This line's share of the document discount
    pub item_discount: f64,
    /// GST-exclusive value after discount (may be negative)
    pub base_excl_gst: f64,
    pub gst_amount: f64,
    /// base_excl_gst + gst_amount
    pub net_total: f64,
}

/// Full calculation result (unrounded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub gross_base: f64,
    pub discount_ratio: f64,
    pub subtotal_excl_gst: f64,
    pub total_gst: f64,
    pub running_subtotal_incl_gst: f64,
    pub grand_total: f64,
    pub per_line: Vec<LineBreakdown>,
}
