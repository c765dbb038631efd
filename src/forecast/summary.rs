//! Fixed-width text report of a fitted model

use std::fmt;

use crate::models::Month;
use crate::stats::distributions::{two_sided_p, Z_975};
use crate::stats::TestResult;

const WIDTH: usize = 78;

/// One row of the coefficient table
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRow {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub z: f64,
    pub p_value: f64,
    pub lower: f64,
    pub upper: f64,
}

impl CoefficientRow {
    /// Derive the z statistic, p-value and 95% interval from the estimate and
    /// its standard error
    pub fn new(name: impl Into<String>, estimate: f64, std_error: f64) -> Self {
        let z = estimate / std_error;
        Self {
            name: name.into(),
            estimate,
            std_error,
            z,
            p_value: two_sided_p(z),
            lower: estimate - Z_975 * std_error,
            upper: estimate + Z_975 * std_error,
        }
    }
}

/// Estimation results with residual diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub model: String,
    pub observations: usize,
    pub sample: Option<(Month, Month)>,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    pub hqic: f64,
    pub coefficients: Vec<CoefficientRow>,
    pub ljung_box: TestResult,
    pub jarque_bera: TestResult,
    pub heteroskedasticity: TestResult,
    pub skew: f64,
    pub kurtosis: f64,
}

/// Four decimals for ordinary magnitudes, scientific notation otherwise
fn number(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value != 0.0 && !(1e-4..1e6).contains(&value.abs()) {
        format!("{:.3e}", value)
    } else {
        format!("{:.4}", value)
    }
}

fn pair(f: &mut fmt::Formatter<'_>, left: (&str, String), right: (&str, String)) -> fmt::Result {
    writeln!(
        f,
        "{:<22}{:>16}   {:<22}{:>15}",
        left.0, left.1, right.0, right.1
    )
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(WIDTH);
        let light = "-".repeat(WIDTH);
        let (start, end) = match self.sample {
            Some((first, last)) => (first.to_string(), format!("- {}", last)),
            None => (String::new(), String::new()),
        };

        writeln!(f, "{:^width$}", "SARIMAX Results", width = WIDTH)?;
        writeln!(f, "{}", heavy)?;
        pair(
            f,
            ("Dep. Variable:", "revenue".into()),
            ("No. Observations:", self.observations.to_string()),
        )?;
        writeln!(
            f,
            "{:<8}{:>30}   {:<22}{:>15}",
            "Model:",
            self.model,
            "Log Likelihood",
            format!("{:.3}", self.log_likelihood)
        )?;
        pair(f, ("Sample:", start), ("AIC", format!("{:.3}", self.aic)))?;
        pair(f, ("", end), ("BIC", format!("{:.3}", self.bic)))?;
        pair(f, ("Covariance Type:", "hessian".into()), ("HQIC", format!("{:.3}", self.hqic)))?;
        writeln!(f, "{}", heavy)?;

        writeln!(
            f,
            "{:<14}{:>10}{:>11}{:>10}{:>10}{:>11}{:>12}",
            "", "coef", "std err", "z", "P>|z|", "[0.025", "0.975]"
        )?;
        writeln!(f, "{}", light)?;
        for row in &self.coefficients {
            writeln!(
                f,
                "{:<14}{:>10}{:>11}{:>10.3}{:>10.3}{:>11}{:>12}",
                row.name,
                number(row.estimate),
                number(row.std_error),
                row.z,
                row.p_value,
                number(row.lower),
                number(row.upper)
            )?;
        }
        writeln!(f, "{}", heavy)?;

        let stat = |v: f64| format!("{:.2}", v);
        pair(
            f,
            ("Ljung-Box (L1) (Q):", stat(self.ljung_box.statistic)),
            ("Jarque-Bera (JB):", stat(self.jarque_bera.statistic)),
        )?;
        pair(
            f,
            ("Prob(Q):", stat(self.ljung_box.p_value)),
            ("Prob(JB):", stat(self.jarque_bera.p_value)),
        )?;
        pair(
            f,
            ("Heteroskedasticity (H):", stat(self.heteroskedasticity.statistic)),
            ("Skew:", stat(self.skew)),
        )?;
        pair(
            f,
            ("Prob(H) (two-sided):", stat(self.heteroskedasticity.p_value)),
            ("Kurtosis:", stat(self.kurtosis)),
        )?;
        write!(f, "{}", heavy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coefficient_row() {
        let row = CoefficientRow::new("ar.L1", 0.5, 0.25);
        assert_relative_eq!(row.z, 2.0);
        assert!(row.p_value > 0.04 && row.p_value < 0.05);
        assert_relative_eq!(row.lower, 0.5 - Z_975 * 0.25);

        let undefined = CoefficientRow::new("sigma2", 1.0, f64::NAN);
        assert!(undefined.p_value.is_nan());
    }

    #[test]
    fn test_number_format() {
        assert_eq!(number(0.12345), "0.1235");
        assert_eq!(number(0.0), "0.0000");
        assert_eq!(number(2.5e9), "2.500e9");
        assert_eq!(number(f64::NAN), "nan");
    }

    #[test]
    fn test_render() {
        let summary = ModelSummary {
            model: "SARIMAX(1, 1, 1)x(1, 1, 1, 12)".into(),
            observations: 19,
            sample: Some((Month::new(2010, 12).unwrap(), Month::new(2012, 6).unwrap())),
            log_likelihood: -70.5,
            aic: 151.0,
            bic: 150.0,
            hqic: 147.0,
            coefficients: vec![CoefficientRow::new("ar.L1", -0.3, 0.4)],
            ljung_box: TestResult {
                statistic: 0.01,
                p_value: 0.92,
            },
            jarque_bera: TestResult {
                statistic: 0.5,
                p_value: 0.78,
            },
            heteroskedasticity: TestResult {
                statistic: 0.7,
                p_value: 0.8,
            },
            skew: -0.3,
            kurtosis: 2.2,
        };

        let text = summary.to_string();
        assert!(text.contains("SARIMAX Results"));
        assert!(text.contains("No. Observations:"));
        assert!(text.contains("2010-12-01"));
        assert!(text.contains("- 2012-06-01"));
        assert!(text.contains("ar.L1"));
        assert!(text.contains("Prob(JB):"));
        assert!(text.contains("-70.500"));
    }
}
