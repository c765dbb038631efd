//! `run` command: execute the forecasting pipeline

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::PipelineConfig;
use crate::display::{format_header, format_thousands, separator};
use crate::error::PipelineResult;
use crate::forecast::{ArimaOrder, SeasonalOrder};
use crate::pipeline::{run_with_progress, PipelineOutcome};

/// Flags of the `run` command; each one overrides the settings file
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Transaction CSV export
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Keep only rows for this country ("" keeps every row)
    #[arg(short, long)]
    pub country: Option<String>,

    /// Directory receiving the plots and the forecast table
    #[arg(short, long, env = "RETAIL_FORECAST_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Share of the months held out for testing, in (0, 1)
    #[arg(long)]
    pub test_ratio: Option<f64>,

    /// Non-seasonal order as p,d,q
    #[arg(long, value_name = "P,D,Q")]
    pub order: Option<ArimaOrder>,

    /// Seasonal order as P,D,Q,s
    #[arg(long, value_name = "P,D,Q,S")]
    pub seasonal_order: Option<SeasonalOrder>,
}

impl RunArgs {
    /// Overlay the flags that were given on top of `config`
    pub fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(country) = &self.country {
            config.country = country.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(ratio) = self.test_ratio {
            config.test_ratio = ratio;
        }
        if let Some(order) = self.order {
            config.order = order;
        }
        if let Some(seasonal) = self.seasonal_order {
            config.seasonal_order = seasonal;
        }
        config
    }
}

/// Handle the `run` command
pub fn handle_run_command(args: &RunArgs, settings_file: Option<&Path>) -> PipelineResult<()> {
    let config = args.apply(PipelineConfig::load_or_default(settings_file)?);
    let outcome = run_with_progress(&config, |line| println!("{}", line))?;
    print!("{}", format_outcome(&outcome));
    Ok(())
}

/// Console report printed after a successful run
pub fn format_outcome(outcome: &PipelineOutcome) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str(&outcome.model_summary.to_string());
    output.push_str("\n\n");

    output.push_str(&format!(
        "MAE: {}, RMSE: {}\n\n",
        format_thousands(outcome.accuracy.mae, 2),
        format_thousands(outcome.accuracy.rmse, 2)
    ));

    output.push_str(&format_header("Forecast vs Actual", 46));
    output.push('\n');
    output.push_str(&separator(46));
    output.push('\n');
    output.push_str(&outcome.forecast_report.format_terminal());
    output.push('\n');

    output.push_str(&outcome.monthly_report.format_terminal());
    output.push('\n');
    output.push_str(&format!(
        "Results saved to {}\n",
        outcome.paths.output_dir().display()
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let args = RunArgs {
            country: Some(String::new()),
            test_ratio: Some(0.25),
            order: Some(ArimaOrder::new(0, 1, 1)),
            ..Default::default()
        };
        let base = PipelineConfig {
            output_dir: PathBuf::from("from-file"),
            ..Default::default()
        };

        let config = args.apply(base);
        assert_eq!(config.country, "");
        assert_eq!(config.test_ratio, 0.25);
        assert_eq!(config.order, ArimaOrder::new(0, 1, 1));
        assert_eq!(config.output_dir, PathBuf::from("from-file"));
        assert_eq!(config.seasonal_order, SeasonalOrder::default());
    }

    #[test]
    fn test_no_flags_keep_settings() {
        let config = RunArgs::default().apply(PipelineConfig::default());
        assert_eq!(config, PipelineConfig::default());
    }
}
