//! retail-forecast - monthly retail revenue forecasting
//!
//! Turns a raw retail transaction export into a monthly revenue series, fits
//! a seasonal ARIMA model on its leading months and scores the forecast
//! against the held-out tail.
//!
//! # Architecture
//!
//! - `config`: pipeline settings and output paths
//! - `error`: custom error types
//! - `models`: transaction records, calendar months, monthly series
//! - `services`: loading, cleaning/aggregation and the train/test split
//! - `stats`: descriptive statistics, distributions and residual tests
//! - `forecast`: the seasonal ARIMA model
//! - `reports`: accuracy metrics, forecast table and monthly overview
//! - `charts`: PNG plots
//! - `pipeline`: the end-to-end run
//! - `cli`, `display`: command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use retail_forecast::{config::PipelineConfig, pipeline};
//!
//! let outcome = pipeline::run(&PipelineConfig::default())?;
//! println!("MAE {:.2}", outcome.accuracy.mae);
//! ```

pub mod charts;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod forecast;
pub mod models;
pub mod pipeline;
pub mod reports;
pub mod services;
pub mod stats;

pub use error::{PipelineError, PipelineResult};
