//! Polynomials in the backshift operator `B`
//!
//! A seasonal ARIMA factors into products such as `(1 - φB)(1 - ΦB^12)`;
//! expanding them once lets the residual and forecast recursions run over a
//! single set of lag coefficients.

/// `c_0 + c_1 B + c_2 B² + ...` with `c_0 = 1`
#[derive(Debug, Clone, PartialEq)]
pub struct LagPolynomial {
    coeffs: Vec<f64>,
}

impl LagPolynomial {
    pub fn one() -> Self {
        Self { coeffs: vec![1.0] }
    }

    /// Autoregressive factor `1 - a_1 B^step - a_2 B^2step - ...`
    pub fn ar(params: &[f64], step: usize) -> Self {
        Self::sparse(params.iter().map(|a| -a), step)
    }

    /// Moving-average factor `1 + b_1 B^step + b_2 B^2step + ...`
    pub fn ma(params: &[f64], step: usize) -> Self {
        Self::sparse(params.iter().copied(), step)
    }

    /// Differencing factor `(1 - B^step)^order`
    pub fn difference(order: usize, step: usize) -> Self {
        (0..order).fold(Self::one(), |acc, _| acc.mul(&Self::sparse([-1.0], step)))
    }

    fn sparse(terms: impl IntoIterator<Item = f64>, step: usize) -> Self {
        let terms: Vec<f64> = terms.into_iter().collect();
        if terms.is_empty() || step == 0 {
            return Self::one();
        }
        let mut coeffs = vec![0.0; terms.len() * step + 1];
        coeffs[0] = 1.0;
        for (i, t) in terms.into_iter().enumerate() {
            coeffs[(i + 1) * step] = t;
        }
        Self { coeffs }
    }

    pub fn mul(&self, other: &Self) -> Self {
        let mut coeffs = vec![0.0; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Self { coeffs }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Apply the polynomial as a filter, `Σ c_k x[t - k]` for every `t` with
    /// a full history; the output is `degree()` values shorter than `x`
    pub fn apply(&self, x: &[f64]) -> Vec<f64> {
        let degree = self.degree();
        if x.len() <= degree {
            return Vec::new();
        }
        (degree..x.len())
            .map(|t| {
                self.coeffs
                    .iter()
                    .enumerate()
                    .map(|(k, c)| c * x[t - k])
                    .sum()
            })
            .collect()
    }
}
