//! Forecast vs actual table
//!
//! One row per test month, written as `forecast_vs_actual.csv` and echoed to
//! the terminal.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::display::format_thousands;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{Month, MonthlySeries};

/// A test month with its observed and predicted revenue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub month: Month,
    pub actual: f64,
    pub forecast: f64,
}

#[derive(Serialize)]
struct CsvRow {
    month: String,
    actual: f64,
    forecast: f64,
}

/// Observed and predicted revenue side by side
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastReport {
    pub rows: Vec<ForecastRow>,
}

impl ForecastReport {
    /// Pair the test segment with a forecast on the same month index
    pub fn generate(test: &MonthlySeries, forecast: &MonthlySeries) -> PipelineResult<Self> {
        if test.months() != forecast.months() {
            return Err(PipelineError::Validation(
                "forecast index does not match the test index".into(),
            ));
        }

        let rows = test
            .points()
            .iter()
            .zip(forecast.points())
            .map(|(a, f)| ForecastRow {
                month: a.month,
                actual: a.value,
                forecast: f.value,
            })
            .collect();
        Ok(Self { rows })
    }

    /// Write the table as CSV with header `month,actual,forecast`
    pub fn export_csv<W: Write>(&self, writer: W) -> PipelineResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if self.rows.is_empty() {
            csv_writer.write_record(["month", "actual", "forecast"])?;
        }
        for row in &self.rows {
            csv_writer.serialize(CsvRow {
                month: row.month.to_string(),
                actual: row.actual,
                forecast: row.forecast,
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the CSV table to `path`, replacing any previous file
    pub fn save(&self, path: &Path) -> PipelineResult<()> {
        let file = std::fs::File::create(path).map_err(|e| {
            PipelineError::Io(format!("Failed to create {}: {}", path.display(), e))
        })?;
        self.export_csv(file)?;
        debug!(path = %path.display(), rows = self.rows.len(), "Wrote forecast table");
        Ok(())
    }

    /// Format the table for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{:<12} {:>16} {:>16}\n", "Month", "Actual", "Forecast"));
        output.push_str(&"-".repeat(46));
        output.push('\n');
        for row in &self.rows {
            output.push_str(&format!(
                "{:<12} {:>16} {:>16}\n",
                row.month.label(),
                format_thousands(row.actual, 2),
                format_thousands(row.forecast, 2)
            ));
        }
        output
    }
}
