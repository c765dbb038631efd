//! Distribution functions used by the model summary and diagnostics

use statrs::distribution::{ChiSquared, Continuous, ContinuousCDF, FisherSnedecor, Normal};

/// 97.5% quantile of the standard normal distribution
pub const Z_975: f64 = 1.959_963_984_540_054;

/// Standard normal cumulative distribution function
pub fn normal_cdf(x: f64) -> f64 {
    Normal::standard().cdf(x)
}

/// Standard normal density
pub fn normal_pdf(x: f64) -> f64 {
    Normal::standard().pdf(x)
}

/// Two-sided p-value of a z statistic
pub fn two_sided_p(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    2.0 * Normal::standard().sf(z.abs())
}

/// Standard normal quantile
pub fn normal_quantile(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    Normal::standard().inverse_cdf(p)
}

/// Chi-squared survival function P(X > x)
pub fn chi_squared_sf(x: f64, df: usize) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 || df == 0 {
        return 1.0;
    }
    match ChiSquared::new(df as f64) {
        Ok(dist) => dist.sf(x),
        Err(_) => f64::NAN,
    }
}

/// F distribution cumulative distribution function
pub fn f_cdf(x: f64, df1: f64, df2: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x.is_infinite() {
        return 1.0;
    }
    match FisherSnedecor::new(df1, df2) {
        Ok(dist) => dist.cdf(x),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_cdf() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(normal_cdf(Z_975), 0.975, epsilon = 1e-12);
        assert_relative_eq!(normal_cdf(-Z_975), 0.025, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_quantile() {
        assert_relative_eq!(normal_quantile(0.5), 0.0, epsilon = 1e-12);
        assert_relative_eq!(normal_quantile(0.975), Z_975, epsilon = 1e-9);
        assert_relative_eq!(normal_quantile(0.01), -2.326_347_874_040_841, epsilon = 1e-9);
        assert!(normal_quantile(0.0).is_infinite());
        assert!(normal_quantile(1.0).is_infinite());
    }

    #[test]
    fn test_two_sided_p() {
        assert_relative_eq!(two_sided_p(Z_975), 0.05, epsilon = 1e-12);
        assert_relative_eq!(two_sided_p(-Z_975), 0.05, epsilon = 1e-12);
        assert_relative_eq!(two_sided_p(0.0), 1.0, epsilon = 1e-12);
        assert!(two_sided_p(f64::NAN).is_nan());
    }

    #[test]
    fn test_chi_squared_sf() {
        // chi2(2) is exponential with mean 2
        assert_relative_eq!(chi_squared_sf(2.0, 2), (-1.0f64).exp(), epsilon = 1e-10);
        assert_relative_eq!(chi_squared_sf(3.841_458_820_694_124, 1), 0.05, epsilon = 1e-9);
        assert_relative_eq!(chi_squared_sf(18.307_038_053_275_146, 10), 0.05, epsilon = 1e-9);
        assert_eq!(chi_squared_sf(0.0, 3), 1.0);
        assert_eq!(chi_squared_sf(4.0, 0), 1.0);
    }

    #[test]
    fn test_f_cdf() {
        // F(d, d) at x = 1 has CDF 0.5 by symmetry
        assert_relative_eq!(f_cdf(1.0, 1.0, 1.0), 0.5, epsilon = 1e-9);
        assert_relative_eq!(f_cdf(1.0, 7.0, 7.0), 0.5, epsilon = 1e-9);
        // upper 5% point of F(5, 10)
        assert_relative_eq!(f_cdf(3.325_834_530_413_012, 5.0, 10.0), 0.95, epsilon = 1e-8);
        assert_eq!(f_cdf(-1.0, 2.0, 2.0), 0.0);
        assert!(f_cdf(1.0, 0.0, 2.0).is_nan());
    }
}
