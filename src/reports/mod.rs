//! Reports produced after a forecast run
//!
//! Accuracy metrics, the forecast vs actual table and the monthly revenue
//! overview printed to the terminal.

pub mod forecast_table;
pub mod metrics;
pub mod monthly_summary;

pub use forecast_table::{ForecastReport, ForecastRow};
pub use metrics::{mae, rmse, ForecastAccuracy};
pub use monthly_summary::MonthlySummaryReport;
