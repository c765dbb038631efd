//! Monthly revenue overview: best months and descriptive statistics

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::display::format_thousands;
use crate::models::{MonthlyPoint, MonthlySeries};
use crate::stats::Summary;

/// Months listed in the top table
pub const TOP_MONTHS: usize = 5;

#[derive(Tabled)]
struct TopMonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
}

#[derive(Tabled)]
struct StatisticRow {
    #[tabled(rename = "Statistic")]
    name: &'static str,
    #[tabled(rename = "Revenue")]
    value: String,
}

/// Top months by revenue plus a describe-style summary
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummaryReport {
    pub top_months: Vec<MonthlyPoint>,
    pub statistics: Summary,
}

impl MonthlySummaryReport {
    pub fn generate(series: &MonthlySeries) -> Self {
        Self {
            top_months: series.top_by_value(TOP_MONTHS),
            statistics: Summary::of(&series.values()),
        }
    }

    /// Format both tables for terminal display
    pub fn format_terminal(&self) -> String {
        let top: Vec<TopMonthRow> = self
            .top_months
            .iter()
            .map(|p| TopMonthRow {
                month: p.month.label(),
                revenue: format_thousands(p.value, 2),
            })
            .collect();

        let s = &self.statistics;
        let stats = [
            ("count", s.count as f64),
            ("mean", s.mean),
            ("std", s.std),
            ("min", s.min),
            ("25%", s.q25),
            ("50%", s.median),
            ("75%", s.q75),
            ("max", s.max),
        ]
        .into_iter()
        .map(|(name, value)| StatisticRow {
            name,
            value: format_thousands(value, 2),
        });

        let mut output = format!("Top {} months by revenue\n", TOP_MONTHS);
        output.push_str(&Table::new(top).with(Style::psql()).to_string());
        output.push_str("\n\nMonthly revenue statistics\n");
        output.push_str(&Table::new(stats).with(Style::psql()).to_string());
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;

    fn series() -> MonthlySeries {
        let index: Vec<Month> = (1..=7).map(|m| Month::new(2011, m).unwrap()).collect();
        let values = [1000.0, 5000.0, 3000.0, 7000.0, 2000.0, 6000.0, 4000.0];
        MonthlySeries::with_index(&index, &values).unwrap()
    }

    #[test]
    fn test_top_months_descending() {
        let report = MonthlySummaryReport::generate(&series());
        let values: Vec<f64> = report.top_months.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![7000.0, 6000.0, 5000.0, 4000.0, 3000.0]);
    }

    #[test]
    fn test_statistics() {
        let report = MonthlySummaryReport::generate(&series());
        assert_eq!(report.statistics.count, 7);
        assert_eq!(report.statistics.mean, 4000.0);
        assert_eq!(report.statistics.median, 4000.0);
        assert_eq!(report.statistics.q25, 2500.0);
    }

    #[test]
    fn test_format_terminal() {
        let text = MonthlySummaryReport::generate(&series()).format_terminal();
        assert!(text.contains("2011-04"));
        assert!(text.contains("7,000.00"));
        assert!(text.contains("75%"));
        assert!(text.contains("2,160.25"));
    }
}
