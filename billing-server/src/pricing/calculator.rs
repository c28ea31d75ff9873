//! GST Totals Calculator
//!
//! Computes every derived figure of an invoice/purchase from its line items
//! and document charges:
//! - proportional discount allocation by gross-value share
//! - GST-exclusive base backed out of the GST-inclusive price
//! - subtotal / GST / grand total aggregation
//!
//! All arithmetic stays in `f64` at full precision. Nothing is rounded here;
//! see [`crate::money`] for the edge rounding.

use shared::billing::{BillingDocument, ChargeSet, LineBreakdown, LineItem, Totals};

/// Compute totals for a set of line items and document charges
///
/// # Calculation Steps
/// 1. `gross_base = Σ quantity * price` (GST-inclusive)
/// 2. `discount_ratio = discount / gross_base` (zero when `gross_base <= 0`)
/// 3. Per line:
///    - `item_discount = item_gross * discount_ratio`
///    - `base_excl_gst = item_gross / (1 + rate/100) - item_discount`
///    - `gst_amount = base_excl_gst * rate / 100`
/// 4. `grand_total = Σ (base + gst) + transportation + unloading + handling ± round_off`
///
/// # Notes
/// - The discount share is taken off the GST-exclusive amount, so the
///   discount itself carries no GST.
/// - A discount larger than a line's GST-exclusive value drives that line's
///   base (and GST) negative. This is returned as-is.
/// - Never panics and never fails: an empty list, a zero gross base or a
///   zero GST rate all degrade to zero/pass-through values.
pub fn compute_totals(line_items: &[LineItem], charges: &ChargeSet) -> Totals {
    if line_items.is_empty() {
        return Totals {
            grand_total: apply_document_charges(0.0, charges),
            ..Totals::default()
        };
    }

    let gross_base: f64 = line_items.iter().map(LineItem::gross_value).sum();

    let discount_ratio = if gross_base > 0.0 {
        charges.discount_total / gross_base
    } else {
        if charges.discount_total != 0.0 {
            tracing::warn!(
                gross_base,
                discount = charges.discount_total,
                "Discount ignored: document has no positive gross value"
            );
        }
        0.0
    };

    let mut subtotal_excl_gst = 0.0;
    let mut total_gst = 0.0;
    let mut running_subtotal_incl_gst = 0.0;
    let mut per_line = Vec::with_capacity(line_items.len());

    for (index, item) in line_items.iter().enumerate() {
        let line = compute_line(item, discount_ratio);

        if line.base_excl_gst < 0.0 {
            tracing::debug!(
                line = index,
                base_excl_gst = line.base_excl_gst,
                item_discount = line.item_discount,
                "Line discount share exceeds its GST-exclusive value"
            );
        }

        subtotal_excl_gst += line.base_excl_gst;
        total_gst += line.gst_amount;
        running_subtotal_incl_gst += line.base_excl_gst + line.gst_amount;
        per_line.push(line);
    }

    let grand_total = apply_document_charges(running_subtotal_incl_gst, charges);

    tracing::debug!(
        lines = line_items.len(),
        gross_base,
        discount_ratio,
        grand_total,
        "Totals computed"
    );

    Totals {
        gross_base,
        discount_ratio,
        subtotal_excl_gst,
        total_gst,
        running_subtotal_incl_gst,
        grand_total,
        per_line,
    }
}

/// Compute totals for a whole billing document
pub fn compute_document_totals(document: &BillingDocument) -> Totals {
    compute_totals(&document.line_items, &document.charges)
}

/// Figures for a single line given the document's discount ratio
pub fn compute_line(item: &LineItem, discount_ratio: f64) -> LineBreakdown {
    let item_gross = item.gross_value();
    let item_discount = item_gross * discount_ratio;
    let base_excl_gst = item_gross / (1.0 + item.gst_rate_percent / 100.0) - item_discount;
    let gst_amount = base_excl_gst * item.gst_rate_percent / 100.0;

    LineBreakdown {
        item_gross,
        item_discount,
        base_excl_gst,
        gst_amount,
        net_total: base_excl_gst + gst_amount,
    }
}

/// Add freight/unloading/handling and the signed round-off to a running total
#[inline]
fn apply_document_charges(running_total: f64, charges: &ChargeSet) -> f64 {
    running_total
        + charges.transportation
        + charges.unloading
        + charges.handling_charge
        + charges.signed_round_off()
}
