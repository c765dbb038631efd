//! Forecast accuracy metrics

use serde::Serialize;

use crate::error::{PipelineError, PipelineResult};
use crate::models::MonthlySeries;

fn check_lengths(actual: &[f64], forecast: &[f64]) -> PipelineResult<()> {
    if actual.is_empty() {
        return Err(PipelineError::Validation(
            "cannot score an empty forecast".into(),
        ));
    }
    if actual.len() != forecast.len() {
        return Err(PipelineError::Validation(format!(
            "actual has {} values but forecast has {}",
            actual.len(),
            forecast.len()
        )));
    }
    Ok(())
}

/// Mean absolute error
pub fn mae(actual: &[f64], forecast: &[f64]) -> PipelineResult<f64> {
    check_lengths(actual, forecast)?;
    let total: f64 = actual.iter().zip(forecast).map(|(a, f)| (a - f).abs()).sum();
    Ok(total / actual.len() as f64)
}

/// Root mean squared error
pub fn rmse(actual: &[f64], forecast: &[f64]) -> PipelineResult<f64> {
    check_lengths(actual, forecast)?;
    let total: f64 = actual.iter().zip(forecast).map(|(a, f)| (a - f).powi(2)).sum();
    Ok((total / actual.len() as f64).sqrt())
}

/// Both accuracy metrics for one forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastAccuracy {
    pub mae: f64,
    pub rmse: f64,
}

impl ForecastAccuracy {
    /// Score `forecast` against `actual`; the two must share a month index
    pub fn evaluate(actual: &MonthlySeries, forecast: &MonthlySeries) -> PipelineResult<Self> {
        if actual.months() != forecast.months() {
            return Err(PipelineError::Validation(
                "forecast index does not match the test index".into(),
            ));
        }
        let (a, f) = (actual.values(), forecast.values());
        Ok(Self {
            mae: mae(&a, &f)?,
            rmse: rmse(&a, &f)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;
    use approx::assert_relative_eq;

    #[test]
    fn test_symmetric_errors() {
        let actual = [100.0, 200.0];
        let forecast = [110.0, 190.0];
        assert_eq!(mae(&actual, &forecast).unwrap(), 10.0);
        assert_eq!(rmse(&actual, &forecast).unwrap(), 10.0);
    }

    #[test]
    fn test_rmse_weights_large_errors() {
        let actual = [0.0, 0.0, 0.0, 0.0];
        let forecast = [0.0, 0.0, 0.0, 4.0];
        assert_relative_eq!(mae(&actual, &forecast).unwrap(), 1.0);
        assert_relative_eq!(rmse(&actual, &forecast).unwrap(), 2.0);
    }

    #[test]
    fn test_length_mismatch_and_empty() {
        assert!(mae(&[1.0, 2.0], &[1.0]).unwrap_err().is_validation());
        assert!(rmse(&[], &[]).unwrap_err().is_validation());
    }

    #[test]
    fn test_evaluate_requires_matching_index() {
        let months = [Month::new(2011, 11).unwrap(), Month::new(2011, 12).unwrap()];
        let actual = MonthlySeries::with_index(&months, &[100.0, 200.0]).unwrap();
        let forecast = MonthlySeries::with_index(&months, &[110.0, 190.0]).unwrap();

        let accuracy = ForecastAccuracy::evaluate(&actual, &forecast).unwrap();
        assert_eq!(accuracy, ForecastAccuracy { mae: 10.0, rmse: 10.0 });

        let shifted = [Month::new(2011, 12).unwrap(), Month::new(2012, 1).unwrap()];
        let misaligned = MonthlySeries::with_index(&shifted, &[110.0, 190.0]).unwrap();
        assert!(ForecastAccuracy::evaluate(&actual, &misaligned).is_err());
    }
}
