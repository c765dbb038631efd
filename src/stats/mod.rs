//! Statistics shared by the forecaster and the reporter

pub mod descriptive;
pub mod distributions;

pub use descriptive::Summary;
pub use residual_tests::TestResult;
