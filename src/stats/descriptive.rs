//! Descriptive statistics over plain slices

/// Arithmetic mean (NaN for an empty slice)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with n - 1 denominator (NaN below two values)
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Sample standard deviation
pub fn sample_std(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Quantile with linear interpolation between closest ranks
///
/// `q` is a fraction in [0, 1]; position `(n - 1) * q` in the sorted data.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Population skewness (third standardized moment)
pub fn skewness(values: &[f64]) -> f64 {
    let (m2, m3, _) = central_moments(values);
    if m2 <= 0.0 {
        return f64::NAN;
    }
    m3 / m2.powf(1.5)
}

/// Population kurtosis (fourth standardized moment, 3 for a normal)
pub fn kurtosis(values: &[f64]) -> f64 {
    let (m2, _, m4) = central_moments(values);
    if m2 <= 0.0 {
        return f64::NAN;
    }
    m4 / (m2 * m2)
}

fn central_moments(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN, f64::NAN);
    }
    let m = mean(values);
    let n = values.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for x in values {
        let d = x - m;
        m2 += d * d;
        m3 += d * d * d;
        m4 += d * d * d * d;
    }
    (m2 / n, m3 / n, m4 / n)
}

/// Sample autocorrelation function for lags `1..=max_lag`
pub fn acf(values: &[f64], max_lag: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let m = mean(values);
    let centered: Vec<f64> = values.iter().map(|x| x - m).collect();
    let denominator: f64 = centered.iter().map(|x| x * x).sum();

    (1..=max_lag.min(n.saturating_sub(1)))
        .map(|lag| {
            if denominator == 0.0 {
                return 0.0;
            }
            centered
                .iter()
                .skip(lag)
                .zip(&centered)
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / denominator
        })
        .collect()
}

/// Gaussian kernel density estimate evaluated at `points`
///
/// Bandwidth follows Scott's rule, `n^(-1/5) * std`.
pub fn gaussian_kde(values: &[f64], points: &[f64]) -> Vec<f64> {
    let n = values.len();
    let std = sample_std(values);
    if n < 2 || !std.is_finite() || std == 0.0 {
        return vec![0.0; points.len()];
    }
    let bandwidth = (n as f64).powf(-0.2) * std;
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    points
        .iter()
        .map(|x| {
            values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm
        })
        .collect()
}

/// Five-number summary plus count, mean and standard deviation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        Self {
            count: values.len(),
            mean: mean(values),
            std: sample_std(values),
            min: quantile(values, 0.0),
            q25: quantile(values, 0.25),
            median: quantile(values, 0.5),
            q75: quantile(values, 0.75),
            max: quantile(values, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0);
        assert_relative_eq!(sample_variance(&values), 32.0 / 7.0);
        assert!(sample_std(&[1.0]).is_nan());
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&values, 0.25), 1.75);
        assert_relative_eq!(quantile(&values, 0.5), 2.5);
        assert_relative_eq!(quantile(&values, 1.0), 4.0);
        assert_relative_eq!(quantile(&[7.0], 0.75), 7.0);
    }

    #[test]
    fn test_moments() {
        let symmetric = [-2.0, -1.0, 0.0, 1.0, 2.0];
        assert_relative_eq!(skewness(&symmetric), 0.0, epsilon = 1e-12);
        // population kurtosis of {-2..2} = (34/5) / (2^2) = 1.7
        assert_relative_eq!(kurtosis(&symmetric), 1.7, epsilon = 1e-12);
        assert!(skewness(&[3.0, 3.0]).is_nan());
    }

    #[test]
    fn test_acf() {
        let alternating = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let r = acf(&alternating, 10);
        assert_eq!(r.len(), 5);
        assert!(r[0] < -0.8);
        assert!(r[1] > 0.6);

        assert_eq!(acf(&[5.0, 5.0, 5.0], 2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let values = [-1.0, -0.5, 0.0, 0.3, 1.2];
        let grid: Vec<f64> = (0..=800).map(|i| -8.0 + i as f64 * 0.02).collect();
        let density = gaussian_kde(&values, &grid);
        let area: f64 = density.iter().sum::<f64>() * 0.02;
        assert_relative_eq!(area, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_summary() {
        let summary = Summary::of(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(summary.count, 4);
        assert_relative_eq!(summary.min, 1.0);
        assert_relative_eq!(summary.median, 2.5);
        assert_relative_eq!(summary.max, 4.0);
    }
}
