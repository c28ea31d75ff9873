//! Billing document: the single immutable input to a calculation pass

use super::types::{ChargeSet, LineItem};
use serde::{Deserialize, Serialize};

/// Which screen produced the document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Sales invoice
    #[default]
    Invoice,
    /// Purchase entry
    Purchase,
}

/// Place-of-supply classification, decides how GST is printed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SupplyType {
    /// CGST + SGST, half the rate each
    #[default]
    IntraState,
    /// IGST at the full rate
    InterState,
}

/// Line items plus document charges, as posted by the billing screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BillingDocument {
    #[serde(default)]
    pub kind: DocumentKind,
    #[serde(default)]
    pub supply: SupplyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_name: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(flatten)]
    pub charges: ChargeSet,
}

impl BillingDocument {
    pub fn new(line_items: Vec<LineItem>, charges: ChargeSet) -> Self {
        Self {
            line_items,
            charges,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}
