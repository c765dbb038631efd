//! Transaction records as read from the retail dataset
//!
//! Every field is optional: the source export has blank cells, returns with
//! negative quantities and free items. Deciding which rows are usable is the
//! cleaner's job, not the reader's.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the raw transaction table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Invoice identifier ("536365"; cancellations start with "C")
    #[serde(rename = "InvoiceNo", default)]
    pub invoice_no: Option<String>,

    /// Item code
    #[serde(rename = "StockCode", default)]
    pub stock_code: Option<String>,

    /// Item description
    #[serde(rename = "Description", default)]
    pub description: Option<String>,

    /// Units sold (negative for returns)
    #[serde(rename = "Quantity", default, deserialize_with = "whole_number")]
    pub quantity: Option<i64>,

    /// Raw timestamp text, parsed by the cleaner
    #[serde(rename = "InvoiceDate", default)]
    pub invoice_date: Option<String>,

    /// Price per unit
    #[serde(
        rename = "UnitPrice",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub unit_price: Option<f64>,

    /// Customer identifier (not required)
    #[serde(rename = "CustomerID", default)]
    pub customer_id: Option<String>,

    /// Category label used for filtering
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
}

/// Integer cell that may have been exported as a float ("6.0")
///
/// Fractional, non-numeric or blank cells become `None`.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_whole_number))
}

fn parse_whole_number(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    let value = text.parse::<f64>().ok()?;
    let in_range = value.abs() < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

impl RawTransaction {
    /// Whether all six required fields carry a value
    pub fn has_required_fields(&self) -> bool {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }

        present(&self.invoice_no)
            && present(&self.stock_code)
            && present(&self.description)
            && present(&self.invoice_date)
            && self.quantity.is_some()
            && self.unit_price.is_some_and(f64::is_finite)
    }
}

/// A transaction that survived cleaning
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLine {
    pub invoice_date: NaiveDateTime,
    pub revenue: f64,
    pub country: Option<String>,
}

/// The raw transaction table handed from the loader to the cleaner
#[derive(Debug, Clone, Default)]
pub struct TransactionTable {
    /// Decoded rows
    pub rows: Vec<RawTransaction>,
    /// Whether the header carried a `Country` column
    pub has_country_column: bool,
    /// Records the CSV reader could not decode at all
    pub skipped_records: usize,
}

impl TransactionTable {
    pub fn new(rows: Vec<RawTransaction>, has_country_column: bool) -> Self {
        Self {
            rows,
            has_country_column,
            skipped_records: 0,
        }
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RawTransaction {
        RawTransaction {
            invoice_no: Some("536365".into()),
            stock_code: Some("85123A".into()),
            description: Some("WHITE HANGING HEART T-LIGHT HOLDER".into()),
            quantity: Some(6),
            invoice_date: Some("2010-12-01 08:26:00".into()),
            unit_price: Some(2.55),
            customer_id: Some("17850".into()),
            country: Some("United Kingdom".into()),
        }
    }

    #[test]
    fn test_parse_whole_number() {
        assert_eq!(parse_whole_number("6"), Some(6));
        assert_eq!(parse_whole_number(" -12 "), Some(-12));
        assert_eq!(parse_whole_number("6.0"), Some(6));
        assert_eq!(parse_whole_number("-3.00"), Some(-3));
        assert_eq!(parse_whole_number("6.5"), None);
        assert_eq!(parse_whole_number("six"), None);
        assert_eq!(parse_whole_number("NaN"), None);
        assert_eq!(parse_whole_number("1e30"), None);
        assert_eq!(parse_whole_number(""), None);
    }

    #[test]
    fn test_required_fields_present() {
        assert!(complete().has_required_fields());
    }

    #[test]
    fn test_customer_and_country_not_required() {
        let row = RawTransaction {
            customer_id: None,
            country: None,
            ..complete()
        };
        assert!(row.has_required_fields());
    }

    #[test]
    fn test_missing_or_blank_fields() {
        let row = RawTransaction {
            description: Some("   ".into()),
            ..complete()
        };
        assert!(!row.has_required_fields());

        let row = RawTransaction {
            quantity: None,
            ..complete()
        };
        assert!(!row.has_required_fields());

        let row = RawTransaction {
            unit_price: Some(f64::NAN),
            ..complete()
        };
        assert!(!row.has_required_fields());
    }
}
