//! End-to-end forecasting run
//!
//! Load → clean/aggregate → split → fit → forecast → score → write artifacts.
//! Both accuracy metrics are computed before anything is written, so a run
//! that fails to score leaves the output directory untouched.

use tracing::info;

use crate::charts::{plot_diagnostics, plot_forecast, plot_train_test};
use crate::config::{OutputPaths, PipelineConfig};
use crate::display::format_count;
use crate::error::{PipelineError, PipelineResult};
use crate::forecast::{ModelSummary, Sarima};
use crate::models::MonthlySeries;
use crate::reports::{ForecastAccuracy, ForecastReport, MonthlySummaryReport};
use crate::services::{clean_and_aggregate_with_stats, load_transactions, time_split, CleaningStats};

/// Smallest series that leaves at least one month for testing
const MIN_SERIES_FOR_TEST: usize = 2;

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub raw_rows: usize,
    pub cleaning: CleaningStats,
    pub series: MonthlySeries,
    pub train: MonthlySeries,
    pub test: MonthlySeries,
    pub forecast: MonthlySeries,
    pub accuracy: ForecastAccuracy,
    pub model_summary: ModelSummary,
    pub forecast_report: ForecastReport,
    pub monthly_report: MonthlySummaryReport,
    pub paths: OutputPaths,
}

/// Run the pipeline without progress output
pub fn run(config: &PipelineConfig) -> PipelineResult<PipelineOutcome> {
    run_with_progress(config, |_| {})
}

/// Run the pipeline, reporting each stage through `progress`
pub fn run_with_progress<F>(config: &PipelineConfig, mut progress: F) -> PipelineResult<PipelineOutcome>
where
    F: FnMut(&str),
{
    config.validate()?;

    progress("Loading data...");
    let table = load_transactions(&config.input_path)?;
    progress(&format!("Raw rows: {}", format_count(table.len())));

    progress("Cleaning & aggregating...");
    let (series, cleaning) = clean_and_aggregate_with_stats(&table, config.country_filter())?;
    if let (Some(first), Some(last)) = (series.first_month(), series.last_month()) {
        progress(&format!(
            "Monthly periods: {} ({} → {})",
            series.len(),
            first.label(),
            last.label()
        ));
    }

    let (train, test) = time_split(&series, config.test_ratio)?;
    progress(&format!("Train size: {}, Test size: {}", train.len(), test.len()));
    if test.is_empty() {
        return Err(PipelineError::InsufficientData {
            context: "test segment",
            needed: MIN_SERIES_FOR_TEST,
            got: series.len(),
        });
    }

    progress("Fitting SARIMAX...");
    let model = Sarima::fit(config.sarima_spec(), &train)?;
    let forecast = model.forecast_aligned(&test)?;
    let accuracy = ForecastAccuracy::evaluate(&test, &forecast)?;
    let forecast_report = ForecastReport::generate(&test, &forecast)?;
    info!(mae = accuracy.mae, rmse = accuracy.rmse, "Scored forecast");

    let paths = OutputPaths::new(&config.output_dir);
    paths.ensure_directories()?;
    plot_train_test(&paths.train_test_plot(), &train, &test)?;
    plot_forecast(&paths.forecast_plot(), &train, &test, &forecast, &accuracy)?;
    plot_diagnostics(&paths.diagnostics_plot(), &model.standardized_residuals())?;
    forecast_report.save(&paths.forecast_table())?;
    info!(output_dir = %paths.output_dir().display(), "Wrote artifacts");

    Ok(PipelineOutcome {
        raw_rows: table.len(),
        cleaning,
        monthly_report: MonthlySummaryReport::generate(&series),
        model_summary: model.summary(),
        series,
        train,
        test,
        forecast,
        accuracy,
        forecast_report,
        paths,
    })
}
