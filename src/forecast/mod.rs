//! Seasonal ARIMA forecasting

pub mod optimization;
pub mod polynomial;
pub mod sarima;
pub mod spec;
pub mod summary;

pub use sarima::{FittedSarima, Sarima};
pub use spec::{ArimaOrder, SarimaSpec, SeasonalOrder};
pub use summary::{CoefficientRow, ModelSummary};
