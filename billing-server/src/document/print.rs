//! Print document for the PDF/receipt renderer
//!
//! Everything the renderer needs, already formatted: per-line figures as
//! 2-dp strings, GST split by place of supply, summary rows in print order
//! and a per-rate tax summary.

use crate::money::{format_money, to_decimal};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use shared::billing::{
    BillingDocument, DocumentKind, LineBreakdown, LineItem, SupplyType, Totals,
};
use std::collections::BTreeMap;

/// GST components of one amount
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct TaxSplit {
    cgst: f64,
    sgst: f64,
    igst: f64,
}

impl TaxSplit {
    fn of(gst_amount: f64, supply: SupplyType) -> Self {
        match supply {
            SupplyType::IntraState => {
                let half = gst_amount / 2.0;
                Self {
                    cgst: half,
                    sgst: half,
                    igst: 0.0,
                }
            }
            SupplyType::InterState => Self {
                igst: gst_amount,
                ..Default::default()
            },
        }
    }
}

/// One printed line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintLine {
    /// 1-based row number
    pub index: usize,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    pub quantity: String,
    /// GST-inclusive price per unit
    pub rate: String,
    pub gst_rate: String,
    pub taxable_value: String,
    pub cgst: String,
    pub sgst: String,
    pub igst: String,
    pub gst_amount: String,
    pub net_total: String,
}

/// Label/amount pair in the totals block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub amount: String,
}

impl SummaryRow {
    fn new(label: &str, amount: f64) -> Self {
        Self {
            label: label.to_string(),
            amount: format_money(amount),
        }
    }
}

/// GST summary for all lines sharing one rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBucket {
    pub gst_rate: String,
    pub taxable_value: String,
    pub cgst: String,
    pub sgst: String,
    pub igst: String,
    pub total_gst: String,
}

#[derive(Default)]
struct BucketSums {
    taxable: f64,
    gst: f64,
}

/// Ready-to-render invoice/purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintDocument {
    pub title: String,
    pub supply: SupplyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_name: Option<String>,
    /// Unix millis
    pub generated_at: i64,
    pub lines: Vec<PrintLine>,
    pub summary: Vec<SummaryRow>,
    pub tax_summary: Vec<TaxBucket>,
}

impl PrintDocument {
    /// Build from a document and the totals computed for it
    pub fn build(document: &BillingDocument, totals: &Totals) -> Self {
        let supply = document.supply;

        let lines = document
            .line_items
            .iter()
            .zip(&totals.per_line)
            .enumerate()
            .map(|(index, (item, line))| print_line(index + 1, item, line, supply))
            .collect();

        Self {
            title: title(document.kind).to_string(),
            supply,
            document_number: document.document_number.clone(),
            party_name: document.party_name.clone(),
            generated_at: chrono::Utc::now().timestamp_millis(),
            lines,
            summary: summary_rows(document, totals),
            tax_summary: tax_summary(document, totals),
        }
    }

    /// Amount printed against a summary label
    pub fn summary_amount(&self, label: &str) -> Option<&str> {
        self.summary
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.amount.as_str())
    }
}

fn title(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Invoice => "Tax Invoice",
        DocumentKind::Purchase => "Purchase",
    }
}

fn print_line(index: usize, item: &LineItem, line: &LineBreakdown, supply: SupplyType) -> PrintLine {
    let split = TaxSplit::of(line.gst_amount, supply);

    PrintLine {
        index,
        product_name: item.product_name.clone().unwrap_or_default(),
        hsn_code: item.hsn_code.clone(),
        quantity: format_quantity(item.quantity),
        rate: format_money(item.unit_price_inclusive_of_gst),
        gst_rate: format_rate(item.gst_rate_percent),
        taxable_value: format_money(line.base_excl_gst),
        cgst: format_money(split.cgst),
        sgst: format_money(split.sgst),
        igst: format_money(split.igst),
        gst_amount: format_money(line.gst_amount),
        net_total: format_money(line.net_total),
    }
}

/// Totals block: sub total, GST, non-zero charges, round-off, grand total
fn summary_rows(document: &BillingDocument, totals: &Totals) -> Vec<SummaryRow> {
    let charges = &document.charges;
    let mut rows = vec![
        SummaryRow::new("Sub Total", totals.subtotal_excl_gst),
        SummaryRow::new("GST", totals.total_gst),
    ];

    for (label, amount) in [
        ("Transportation", charges.transportation),
        ("Unloading", charges.unloading),
        ("Handling Charge", charges.handling_charge),
        ("Round Off", charges.signed_round_off()),
    ] {
        if amount != 0.0 {
            rows.push(SummaryRow::new(label, amount));
        }
    }

    rows.push(SummaryRow::new("Grand Total", totals.grand_total));
    rows
}

/// Per-rate GST summary, ascending by rate
fn tax_summary(document: &BillingDocument, totals: &Totals) -> Vec<TaxBucket> {
    let mut buckets: BTreeMap<Decimal, BucketSums> = BTreeMap::new();

    for (item, line) in document.line_items.iter().zip(&totals.per_line) {
        let sums = buckets
            .entry(to_decimal(item.gst_rate_percent).normalize())
            .or_default();
        sums.taxable += line.base_excl_gst;
        sums.gst += line.gst_amount;
    }

    buckets
        .into_iter()
        .map(|(rate, sums)| {
            let split = TaxSplit::of(sums.gst, document.supply);
            TaxBucket {
                gst_rate: format!("{rate}%"),
                taxable_value: format_money(sums.taxable),
                cgst: format_money(split.cgst),
                sgst: format_money(split.sgst),
                igst: format_money(split.igst),
                total_gst: format_money(sums.gst),
            }
        })
        .collect()
}

fn format_rate(rate: f64) -> String {
    match Decimal::from_f64(rate) {
        Some(rate) => format!("{}%", rate.normalize()),
        None => format!("{}%", finite_or_zero(rate)),
    }
}

/// Up to three decimals, trailing zeros dropped (`2` not `2.000`)
fn format_quantity(quantity: f64) -> String {
    match Decimal::from_f64(quantity) {
        Some(quantity) => quantity.round_dp(3).normalize().to_string(),
        None => finite_or_zero(quantity).to_string(),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
