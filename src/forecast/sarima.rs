//! Seasonal ARIMA estimation and forecasting
//!
//! The model is `φ(B)Φ(B^s) (1-B)^d (1-B^s)^D y_t = θ(B)Θ(B^s) e_t`, estimated
//! by conditional sum of squares: the differenced series is filtered through
//! the expanded AR and MA polynomials with pre-sample values and errors set to
//! zero, and the Gaussian profile likelihood of the resulting residuals is
//! minimized with Nelder-Mead. Coefficients are not constrained to the
//! stationary or invertible region.

use tracing::{debug, info, warn};

use super::optimization::{minimize, SimplexSettings};
use super::polynomial::LagPolynomial;
use super::spec::SarimaSpec;
use super::summary::{CoefficientRow, ModelSummary};
use crate::error::{PipelineError, PipelineResult};
use crate::models::{Month, MonthlySeries};
use crate::stats::descriptive::{kurtosis, skewness};
use crate::stats::residual_tests::{heteroskedasticity, jarque_bera, ljung_box};

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Entry point for fitting; see [`Sarima::fit`]
pub struct Sarima;

impl Sarima {
    /// Fit `spec` to the training series
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Validation`] for an unusable specification
    /// - [`PipelineError::InsufficientData`] when the differenced series is
    ///   shorter than the number of estimated parameters plus one
    /// - [`PipelineError::Model`] when no finite objective value is reached
    pub fn fit(spec: SarimaSpec, train: &MonthlySeries) -> PipelineResult<FittedSarima> {
        spec.validate()?;

        let history = train.values();
        if history.iter().any(|v| !v.is_finite()) {
            return Err(PipelineError::Validation(
                "training series contains non-finite values".into(),
            ));
        }

        let integration = LagPolynomial::difference(spec.order.d, 1)
            .mul(&LagPolynomial::difference(spec.seasonal.d, spec.period()));
        let differenced = integration.apply(&history);

        let k = spec.num_coefficients() + 1;
        let needed = spec.differencing_loss() + k + 1;
        if history.len() < needed {
            return Err(PipelineError::InsufficientData {
                context: "seasonal ARIMA fit",
                needed,
                got: history.len(),
            });
        }

        let objective = |params: &[f64]| profile_objective(&spec, &differenced, params);
        let start = starting_point(&spec);
        let first = minimize(&objective, &start, SimplexSettings::default());
        let second = minimize(&objective, &first.point, SimplexSettings::default());
        let best = if second.value <= first.value { second } else { first };
        debug!(
            iterations = best.iterations,
            converged = best.converged,
            objective = best.value,
            "Nelder-Mead finished"
        );

        if !best.value.is_finite() || best.value >= f64::MAX {
            return Err(PipelineError::Model(format!(
                "{} estimation did not reach a finite objective",
                spec
            )));
        }
        if !best.converged {
            warn!(iterations = best.iterations, "Optimizer stopped before converging");
        }

        let params = best.point;
        let (ar, ma) = arma_polynomials(&spec, &params);
        let residuals = arma_residuals(&ar, &ma, &differenced);
        let n = residuals.len() as f64;
        let sigma2 = residuals.iter().map(|e| e * e).sum::<f64>() / n;
        let log_likelihood = -0.5 * n * (LN_2PI + sigma2.ln() + 1.0);
        let std_errors = standard_errors(&spec, &differenced, &params, sigma2);

        info!(
            model = %spec,
            nobs = history.len(),
            sigma2,
            log_likelihood,
            "Fitted seasonal ARIMA"
        );

        Ok(FittedSarima {
            spec,
            history,
            sample: train.first_month().zip(train.last_month()),
            integration,
            differenced,
            ar,
            ma,
            params,
            residuals,
            sigma2,
            log_likelihood,
            std_errors,
        })
    }
}

/// A fitted seasonal ARIMA model
#[derive(Debug, Clone)]
pub struct FittedSarima {
    spec: SarimaSpec,
    history: Vec<f64>,
    sample: Option<(Month, Month)>,
    integration: LagPolynomial,
    differenced: Vec<f64>,
    ar: LagPolynomial,
    ma: LagPolynomial,
    /// `[ar.L*, ma.L*, ar.S.L*, ma.S.L*]`
    params: Vec<f64>,
    residuals: Vec<f64>,
    sigma2: f64,
    log_likelihood: f64,
    /// One entry per parameter followed by sigma2
    std_errors: Vec<f64>,
}

impl FittedSarima {
    pub fn spec(&self) -> SarimaSpec {
        self.spec
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Estimated parameters counted by the information criteria
    fn num_estimated(&self) -> f64 {
        (self.params.len() + 1) as f64
    }

    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood + 2.0 * self.num_estimated()
    }

    pub fn bic(&self) -> f64 {
        -2.0 * self.log_likelihood + self.num_estimated() * (self.residuals.len() as f64).ln()
    }

    pub fn hqic(&self) -> f64 {
        -2.0 * self.log_likelihood
            + 2.0 * self.num_estimated() * (self.residuals.len() as f64).ln().ln()
    }

    /// One-step residuals over the differenced sample
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Residuals scaled by the innovation standard deviation
    pub fn standardized_residuals(&self) -> Vec<f64> {
        let sd = self.sigma2.sqrt();
        if sd > 0.0 && sd.is_finite() {
            self.residuals.iter().map(|e| e / sd).collect()
        } else {
            vec![0.0; self.residuals.len()]
        }
    }

    /// Point forecasts for the `steps` months after the training sample
    pub fn forecast(&self, steps: usize) -> Vec<f64> {
        let ar = self.ar.coefficients();
        let ma = self.ma.coefficients();

        let mut w = self.differenced.clone();
        let mut e = self.residuals.clone();
        for _ in 0..steps {
            let t = w.len();
            let autoregressive: f64 = (1..ar.len().min(t + 1)).map(|k| ar[k] * w[t - k]).sum();
            let moving_average: f64 = (1..ma.len().min(t + 1)).map(|j| ma[j] * e[t - j]).sum();
            w.push(moving_average - autoregressive);
            e.push(0.0);
        }

        let delta = self.integration.coefficients();
        let mut y = self.history.clone();
        for &wt in &w[self.differenced.len()..] {
            let t = y.len();
            let carried: f64 = (1..delta.len()).map(|k| delta[k] * y[t - k]).sum();
            y.push(wt - carried);
        }
        y.split_off(self.history.len())
    }

    /// Forecast one value per month of `test`, indexed by those same months
    pub fn forecast_aligned(&self, test: &MonthlySeries) -> PipelineResult<MonthlySeries> {
        let predictions = self.forecast(test.len());
        MonthlySeries::with_index(&test.months(), &predictions)
    }

    /// Parameter names in estimation order, followed by `sigma2`
    pub fn coefficient_names(&self) -> Vec<String> {
        let s = self.spec.seasonal.s;
        let mut names = Vec::with_capacity(self.params.len() + 1);
        names.extend((1..=self.spec.order.p).map(|i| format!("ar.L{}", i)));
        names.extend((1..=self.spec.order.q).map(|i| format!("ma.L{}", i)));
        names.extend((1..=self.spec.seasonal.p).map(|i| format!("ar.S.L{}", i * s)));
        names.extend((1..=self.spec.seasonal.q).map(|i| format!("ma.S.L{}", i * s)));
        names.push("sigma2".to_string());
        names
    }

    /// Estimation results and residual diagnostics
    pub fn summary(&self) -> ModelSummary {
        let estimates = self.params.iter().copied().chain(std::iter::once(self.sigma2));
        let coefficients = self
            .coefficient_names()
            .into_iter()
            .zip(estimates)
            .zip(&self.std_errors)
            .map(|((name, estimate), &std_error)| CoefficientRow::new(name, estimate, std_error))
            .collect();

        ModelSummary {
            model: self.spec.to_string(),
            observations: self.history.len(),
            sample: self.sample,
            log_likelihood: self.log_likelihood,
            aic: self.aic(),
            bic: self.bic(),
            hqic: self.hqic(),
            coefficients,
            ljung_box: ljung_box(&self.residuals, 1),
            jarque_bera: jarque_bera(&self.residuals),
            heteroskedasticity: heteroskedasticity(&self.residuals),
            skew: skewness(&self.residuals),
            kurtosis: kurtosis(&self.residuals),
        }
    }
}

/// `0.1 / lag` within each coefficient block
fn starting_point(spec: &SarimaSpec) -> Vec<f64> {
    [spec.order.p, spec.order.q, spec.seasonal.p, spec.seasonal.q]
        .into_iter()
        .flat_map(|len| (0..len).map(|i| 0.1 / (i + 1) as f64))
        .collect()
}

/// Expanded `φ(B)Φ(B^s)` and `θ(B)Θ(B^s)` for a parameter vector
fn arma_polynomials(spec: &SarimaSpec, params: &[f64]) -> (LagPolynomial, LagPolynomial) {
    let (p, q) = (spec.order.p, spec.order.q);
    let (sp, sq) = (spec.seasonal.p, spec.seasonal.q);
    let s = spec.period();

    let (ar, rest) = params.split_at(p);
    let (ma, rest) = rest.split_at(q);
    let (sar, sma) = rest.split_at(sp);
    debug_assert_eq!(sma.len(), sq);

    (
        LagPolynomial::ar(ar, 1).mul(&LagPolynomial::ar(sar, s)),
        LagPolynomial::ma(ma, 1).mul(&LagPolynomial::ma(sma, s)),
    )
}

/// `e_t = Σ a_k w_{t-k} - Σ_{j≥1} m_j e_{t-j}`, zero before the sample
fn arma_residuals(ar: &LagPolynomial, ma: &LagPolynomial, w: &[f64]) -> Vec<f64> {
    let a = ar.coefficients();
    let m = ma.coefficients();
    let mut e = Vec::with_capacity(w.len());
    for t in 0..w.len() {
        let filtered: f64 = (0..a.len().min(t + 1)).map(|k| a[k] * w[t - k]).sum();
        let feedback: f64 = (1..m.len().min(t + 1)).map(|j| m[j] * e[t - j]).sum();
        e.push(filtered - feedback);
    }
    e
}

fn sum_of_squares(spec: &SarimaSpec, w: &[f64], params: &[f64]) -> f64 {
    let (ar, ma) = arma_polynomials(spec, params);
    arma_residuals(&ar, &ma, w).iter().map(|e| e * e).sum()
}

/// Negative profile log-likelihood up to a constant, `n/2 ln(CSS/n)`
fn profile_objective(spec: &SarimaSpec, w: &[f64], params: &[f64]) -> f64 {
    let css = sum_of_squares(spec, w, params);
    if !css.is_finite() {
        return f64::MAX;
    }
    let n = w.len() as f64;
    0.5 * n * (css / n).max(f64::MIN_POSITIVE).ln()
}

/// Standard errors from the inverse numerical Hessian of the negative
/// log-likelihood in `(params, sigma2)`
fn standard_errors(spec: &SarimaSpec, w: &[f64], params: &[f64], sigma2: f64) -> Vec<f64> {
    let dim = params.len() + 1;
    let undefined = vec![f64::NAN; dim];
    if !(sigma2 > 0.0 && sigma2.is_finite()) {
        return undefined;
    }

    let n = w.len() as f64;
    let negative_ll = |x: &[f64]| {
        let s2 = x[dim - 1];
        if s2 <= 0.0 {
            return f64::NAN;
        }
        0.5 * n * (LN_2PI + s2.ln()) + sum_of_squares(spec, w, &x[..dim - 1]) / (2.0 * s2)
    };

    let mut x: Vec<f64> = params.to_vec();
    x.push(sigma2);
    let steps: Vec<f64> = x
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i == dim - 1 {
                1e-4 * v.abs()
            } else {
                1e-4 * v.abs().max(1.0)
            }
        })
        .collect();

    let hessian = numerical_hessian(negative_ll, &x, &steps);
    if hessian.iter().flatten().any(|v| !v.is_finite()) {
        return undefined;
    }
    match invert(hessian) {
        Some(inverse) => (0..dim)
            .map(|i| {
                let variance = inverse[i][i];
                if variance > 0.0 {
                    variance.sqrt()
                } else {
                    f64::NAN
                }
            })
            .collect(),
        None => {
            debug!("Hessian is singular, standard errors unavailable");
            undefined
        }
    }
}

fn numerical_hessian<F>(f: F, x: &[f64], steps: &[f64]) -> Vec<Vec<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    let dim = x.len();
    let at = |offsets: &[(usize, f64)]| {
        let mut point = x.to_vec();
        for &(i, delta) in offsets {
            point[i] += delta;
        }
        f(&point)
    };
    let center = f(x);

    let mut hessian = vec![vec![0.0; dim]; dim];
    for i in 0..dim {
        let hi = steps[i];
        hessian[i][i] = (at(&[(i, hi)]) - 2.0 * center + at(&[(i, -hi)])) / (hi * hi);
        for j in 0..i {
            let hj = steps[j];
            let value = (at(&[(i, hi), (j, hj)]) - at(&[(i, hi), (j, -hj)])
                - at(&[(i, -hi), (j, hj)])
                + at(&[(i, -hi), (j, -hj)]))
                / (4.0 * hi * hj);
            hessian[i][j] = value;
            hessian[j][i] = value;
        }
    }
    hessian
}

/// Gauss-Jordan inversion with partial pivoting
fn invert(mut matrix: Vec<Vec<f64>>) -> Option<Vec<Vec<f64>>> {
    let dim = matrix.len();
    let scale = matrix
        .iter()
        .flatten()
        .fold(0.0f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return None;
    }

    let mut inverse: Vec<Vec<f64>> = (0..dim)
        .map(|i| (0..dim).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for col in 0..dim {
        let pivot = (col..dim).max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))?;
        if matrix[pivot][col].abs() <= scale * 1e-14 {
            return None;
        }
        matrix.swap(col, pivot);
        inverse.swap(col, pivot);

        let diagonal = matrix[col][col];
        for j in 0..dim {
            matrix[col][j] /= diagonal;
            inverse[col][j] /= diagonal;
        }
        for row in 0..dim {
            if row == col {
                continue;
            }
            let factor = matrix[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..dim {
                matrix[row][j] -= factor * matrix[col][j];
                inverse[row][j] -= factor * inverse[col][j];
            }
        }
    }
    Some(inverse)
}
