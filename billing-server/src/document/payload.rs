//! Submission payload for the persistence backend

use crate::money::round_money;
use serde::{Deserialize, Serialize};
use shared::billing::{
    BillingDocument, ChargeSet, DocumentKind, LineBreakdown, LineItem, SupplyType, Totals,
};

/// One persisted line: the entered fields plus its rounded figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    pub quantity: f64,
    #[serde(rename = "sellingPriceinQty")]
    pub selling_price_in_qty: f64,
    pub gst_rate: f64,
    pub item_discount: f64,
    pub base_excl_gst: f64,
    pub gst_amount: f64,
    pub net_total: f64,
}

impl PayloadLine {
    fn build(item: &LineItem, line: &LineBreakdown) -> Self {
        Self {
            product_name: item.product_name.clone(),
            hsn_code: item.hsn_code.clone(),
            quantity: item.quantity,
            selling_price_in_qty: item.unit_price_inclusive_of_gst,
            gst_rate: item.gst_rate_percent,
            item_discount: round_money(line.item_discount),
            base_excl_gst: round_money(line.base_excl_gst),
            gst_amount: round_money(line.gst_amount),
            net_total: round_money(line.net_total),
        }
    }
}

/// Body posted to the backend when an invoice or purchase is saved
///
/// Document charges keep the wire names of the billing screens
/// (`discount`, `handlingCharge`, `roundOff`, `roundOffMode`...).
/// Subtotal, GST and grand total are each rounded on their own, so the
/// subtotal is not guaranteed to equal the sum of the rounded line nets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub kind: DocumentKind,
    pub supply: SupplyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_name: Option<String>,
    pub line_items: Vec<PayloadLine>,
    #[serde(flatten)]
    pub charges: ChargeSet,
    pub subtotal: f64,
    pub total_gst: f64,
    pub grand_total: f64,
}

impl SubmissionPayload {
    /// Build from a document and the totals computed for it
    pub fn build(document: &BillingDocument, totals: &Totals) -> Self {
        let line_items = document
            .line_items
            .iter()
            .zip(&totals.per_line)
            .map(|(item, line)| PayloadLine::build(item, line))
            .collect();

        Self {
            kind: document.kind,
            supply: document.supply,
            document_number: document.document_number.clone(),
            party_name: document.party_name.clone(),
            line_items,
            charges: document.charges.clone(),
            subtotal: round_money(totals.subtotal_excl_gst),
            total_gst: round_money(totals.total_gst),
            grand_total: round_money(totals.grand_total),
        }
    }
}
