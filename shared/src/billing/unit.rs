//! Measurement units used when a line is entered on the billing screens

use super::number::lenient_f64;
use serde::{Deserialize, Serialize};

/// How the entered quantity/price relate to the product's stock unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitMode {
    /// Square feet: quantity entered as area
    Sqft,
    /// Boxes: quantity entered in boxes of `ps_ratio` pieces
    Box,
    /// Plain count
    #[default]
    Nos,
    /// Tile count
    Tnos,
}

fn one() -> f64 {
    1.0
}

/// Product dimensions driving unit conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDims {
    #[serde(default = "one", deserialize_with = "lenient_f64")]
    pub length: f64,
    #[serde(default = "one", deserialize_with = "lenient_f64")]
    pub breadth: f64,
    /// Pieces per box
    #[serde(default = "one", deserialize_with = "lenient_f64")]
    pub ps_ratio: f64,
}

impl ProductDims {
    pub fn new(length: f64, breadth: f64, ps_ratio: f64) -> Self {
        Self {
            length,
            breadth,
            ps_ratio,
        }
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.length * self.breadth
    }
}

impl Default for ProductDims {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// A line as typed into the form, before unit conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnteredLine {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
    /// Entered price, GST-inclusive, per entered unit
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gst_rate: f64,
    #[serde(default)]
    pub unit_mode: UnitMode,
    #[serde(flatten)]
    pub dims: ProductDims,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
}

impl EnteredLine {
    pub fn new(quantity: f64, price: f64, gst_rate: f64, unit_mode: UnitMode, dims: ProductDims) -> Self {
        Self {
            quantity,
            price,
            gst_rate,
            unit_mode,
            dims,
            product_name: None,
            hsn_code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_mode_wire_names() {
        assert_eq!(serde_json::to_string(&UnitMode::Sqft).unwrap(), r#""SQFT""#);
        assert_eq!(
            serde_json::from_str::<UnitMode>(r#""TNOS""#).unwrap(),
            UnitMode::Tnos
        );
        assert!(serde_json::from_str::<UnitMode>(r#""LITRE""#).is_err());
    }

    #[test]
    fn test_entered_line_flattened_dims() {
        let line: EnteredLine = serde_json::from_str(
            r#"{"quantity": "12", "price": 100, "gstRate": 18, "unitMode": "SQFT",
                "length": 2, "breadth": "3", "psRatio": 4}"#,
        )
        .unwrap();
        assert_eq!(line.unit_mode, UnitMode::Sqft);
        assert_eq!(line.dims, ProductDims::new(2.0, 3.0, 4.0));
        assert_eq!(line.dims.area(), 6.0);
    }

    #[test]
    fn test_entered_line_defaults() {
        let line: EnteredLine = serde_json::from_str(r#"{"quantity": 3, "price": 10}"#).unwrap();
        assert_eq!(line.unit_mode, UnitMode::Nos);
        assert_eq!(line.dims, ProductDims::default());
        assert_eq!(line.gst_rate, 0.0);
    }
}
