//! Cleaning and monthly aggregation
//!
//! Turns the raw transaction table into the monthly revenue series:
//!
//! 1. drop rows missing a required field
//! 2. keep rows with quantity > 0 and unit price > 0
//! 3. parse the timestamp, dropping rows that do not parse
//! 4. revenue = quantity × unit price
//! 5. optional country filter
//! 6. sum revenue per calendar month
//! 7. drop months whose total is not positive
//! 8. fail if no month is left

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{Month, MonthlyPoint, MonthlySeries, RawTransaction, SaleLine, TransactionTable};

/// Timestamp layouts seen in exports of the retail workbook
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Row counts for each cleaning step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningStats {
    pub rows_read: usize,
    pub missing_fields: usize,
    pub invalid_quantity_or_price: usize,
    pub unparseable_dates: usize,
    pub filtered_by_country: usize,
    pub rows_kept: usize,
    pub months: usize,
    pub non_positive_months: usize,
}

/// Clean the table and aggregate revenue per calendar month
///
/// `country` of `None` (or an empty string) keeps every row. The filter is
/// ignored when the table has no country column.
///
/// # Errors
///
/// [`PipelineError::EmptySeries`] if no month with positive revenue remains.
pub fn clean_and_aggregate(
    table: &TransactionTable,
    country: Option<&str>,
) -> PipelineResult<MonthlySeries> {
    clean_and_aggregate_with_stats(table, country).map(|(series, _)| series)
}

/// Same as [`clean_and_aggregate`], also returning per-step row counts
pub fn clean_and_aggregate_with_stats(
    table: &TransactionTable,
    country: Option<&str>,
) -> PipelineResult<(MonthlySeries, CleaningStats)> {
    let mut stats = CleaningStats {
        rows_read: table.len(),
        ..Default::default()
    };

    let country = country
        .map(str::trim)
        .filter(|c| !c.is_empty() && table.has_country_column);

    let mut monthly: BTreeMap<Month, f64> = BTreeMap::new();
    for row in &table.rows {
        let Some(line) = sale_line(row, &mut stats) else {
            continue;
        };

        if let Some(wanted) = country {
            if line.country.as_deref() != Some(wanted) {
                stats.filtered_by_country += 1;
                continue;
            }
        }

        stats.rows_kept += 1;
        *monthly
            .entry(Month::from_date(line.invoice_date.date()))
            .or_insert(0.0) += line.revenue;
    }

    stats.months = monthly.len();
    let points: Vec<MonthlyPoint> = monthly
        .into_iter()
        .filter(|&(_, revenue)| revenue > 0.0)
        .map(|(month, revenue)| MonthlyPoint::new(month, revenue))
        .collect();
    stats.non_positive_months = stats.months - points.len();

    debug!(?stats, "Cleaning complete");

    if points.is_empty() {
        return Err(PipelineError::EmptySeries);
    }

    // BTreeMap iteration keeps the keys strictly increasing
    let series = MonthlySeries::new(points)?;
    Ok((series, stats))
}

/// Steps 1-4 for a single row
fn sale_line(row: &RawTransaction, stats: &mut CleaningStats) -> Option<SaleLine> {
    if !row.has_required_fields() {
        stats.missing_fields += 1;
        return None;
    }

    let (quantity, unit_price) = match (row.quantity, row.unit_price) {
        (Some(q), Some(p)) if q > 0 && p > 0.0 => (q, p),
        _ => {
            stats.invalid_quantity_or_price += 1;
            return None;
        }
    };

    let Some(invoice_date) = row.invoice_date.as_deref().and_then(parse_timestamp) else {
        stats.unparseable_dates += 1;
        return None;
    };

    Some(SaleLine {
        invoice_date,
        revenue: quantity as f64 * unit_price,
        country: row.country.clone(),
    })
}

/// Parse a timestamp using multiple format attempts
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(quantity: i64, price: f64, date: &str, country: &str) -> RawTransaction {
        RawTransaction {
            invoice_no: Some("536365".into()),
            stock_code: Some("85123A".into()),
            description: Some("HOLDER".into()),
            quantity: Some(quantity),
            invoice_date: Some(date.into()),
            unit_price: Some(price),
            customer_id: None,
            country: Some(country.into()),
        }
    }

    fn table(rows: Vec<RawTransaction>) -> TransactionTable {
        TransactionTable::new(rows, true)
    }

    fn month(year: i32, m: u32) -> Month {
        Month::new(year, m).unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2010, 12, 1)
            .unwrap()
            .and_hms_opt(8, 26, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2010-12-01 08:26:00"), Some(expected));
        assert_eq!(parse_timestamp("12/1/2010 8:26"), Some(expected));
        assert_eq!(parse_timestamp("2010-12-01T08:26:00"), Some(expected));
        assert!(parse_timestamp("2010-12-01").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_sum_excludes_returns() {
        let rows = vec![
            row(10, 2.5, "2011-01-05 10:00:00", "United Kingdom"),
            row(-10, 2.5, "2011-01-06 10:00:00", "United Kingdom"),
        ];
        let series = clean_and_aggregate(&table(rows), None).unwrap();

        assert_eq!(series.len(), 1);
        assert_relative_eq!(series.points()[0].value, 25.0);
    }

    #[test]
    fn test_zero_price_and_bad_dates_are_dropped() {
        let rows = vec![
            row(3, 0.0, "2011-01-05 10:00:00", "United Kingdom"),
            row(3, 1.0, "not a date", "United Kingdom"),
            row(3, 1.0, "2011-02-05 10:00:00", "United Kingdom"),
        ];
        let (series, stats) = clean_and_aggregate_with_stats(&table(rows), None).unwrap();

        assert_eq!(series.months(), vec![month(2011, 2)]);
        assert_eq!(stats.invalid_quantity_or_price, 1);
        assert_eq!(stats.unparseable_dates, 1);
        assert_eq!(stats.rows_kept, 1);
    }

    #[test]
    fn test_missing_fields_are_dropped() {
        let mut incomplete = row(5, 1.0, "2011-03-01 09:00:00", "France");
        incomplete.stock_code = None;
        let rows = vec![incomplete, row(1, 4.0, "2011-03-02 09:00:00", "France")];

        let (series, stats) = clean_and_aggregate_with_stats(&table(rows), None).unwrap();
        assert_relative_eq!(series.points()[0].value, 4.0);
        assert_eq!(stats.missing_fields, 1);
    }

    #[test]
    fn test_months_are_ordered_and_positive() {
        let rows = vec![
            row(1, 5.0, "2011-03-15 12:00:00", "United Kingdom"),
            row(2, 1.0, "2010-12-01 08:26:00", "United Kingdom"),
            row(4, 1.5, "2011-01-20 12:00:00", "United Kingdom"),
            row(1, 1.0, "2011-03-31 23:59:00", "United Kingdom"),
        ];
        let series = clean_and_aggregate(&table(rows), Some("")).unwrap();

        assert_eq!(
            series.months(),
            vec![month(2010, 12), month(2011, 1), month(2011, 3)]
        );
        assert!(series.values().iter().all(|v| *v > 0.0));
        assert_relative_eq!(series.points()[2].value, 6.0);
    }

    #[test]
    fn test_country_filter_is_subset() {
        let rows = vec![
            row(1, 10.0, "2011-01-05 10:00:00", "United Kingdom"),
            row(1, 7.0, "2011-01-06 10:00:00", "France"),
            row(1, 3.0, "2011-02-06 10:00:00", "France"),
            row(2, 4.0, "2011-02-07 10:00:00", "United Kingdom"),
        ];
        let data = table(rows);
        let all = clean_and_aggregate(&data, None).unwrap();
        let uk = clean_and_aggregate(&data, Some("United Kingdom")).unwrap();

        for point in uk.points() {
            let total = all
                .points()
                .iter()
                .find(|p| p.month == point.month)
                .map(|p| p.value)
                .unwrap();
            assert!(point.value <= total);
        }
        assert_eq!(uk.values(), vec![10.0, 8.0]);
    }

    #[test]
    fn test_country_filter_ignored_without_column() {
        let rows = vec![row(1, 10.0, "2011-01-05 10:00:00", "France")];
        let data = TransactionTable::new(rows, false);

        let series = clean_and_aggregate(&data, Some("United Kingdom")).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_all_invalid_is_empty_series() {
        let rows = vec![
            row(-1, 2.0, "2011-01-05 10:00:00", "United Kingdom"),
            row(4, -2.0, "2011-01-05 10:00:00", "United Kingdom"),
        ];
        let err = clean_and_aggregate(&table(rows), None).unwrap_err();
        assert!(err.is_empty_series());
    }

    #[test]
    fn test_unknown_country_is_empty_series() {
        let rows = vec![row(1, 2.0, "2011-01-05 10:00:00", "United Kingdom")];
        let err = clean_and_aggregate(&table(rows), Some("Atlantis")).unwrap_err();
        assert!(err.is_empty_series());
    }
}
