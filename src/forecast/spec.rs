//! Model order specification
//!
//! Structural parameters of a seasonal ARIMA model: the non-seasonal
//! `(p, d, q)` triple and the seasonal `(P, D, Q, s)` quadruple.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Non-seasonal ARIMA order `(p, d, q)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    /// AR order
    pub p: usize,
    /// Differencing order
    pub d: usize,
    /// MA order
    pub q: usize,
}

impl ArimaOrder {
    pub const fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.p, self.d, self.q)
    }
}

impl FromStr for ArimaOrder {
    type Err = PipelineError;

    /// Parse `"p,d,q"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = parse_usize_list(s, 3, "order")?;
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

/// Seasonal order `(P, D, Q, s)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalOrder {
    /// Seasonal AR order
    pub p: usize,
    /// Seasonal differencing order
    pub d: usize,
    /// Seasonal MA order
    pub q: usize,
    /// Season length (12 for monthly data)
    pub s: usize,
}

impl SeasonalOrder {
    pub const fn new(p: usize, d: usize, q: usize, s: usize) -> Self {
        Self { p, d, q, s }
    }

    /// Whether any seasonal term is requested
    pub fn is_seasonal(&self) -> bool {
        self.p + self.d + self.q > 0
    }
}

impl Default for SeasonalOrder {
    fn default() -> Self {
        Self::new(1, 1, 1, 12)
    }
}

impl fmt::Display for SeasonalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.p, self.d, self.q, self.s)
    }
}

impl FromStr for SeasonalOrder {
    type Err = PipelineError;

    /// Parse `"P,D,Q,s"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = parse_usize_list(s, 4, "seasonal order")?;
        Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }
}

/// Full SARIMA specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SarimaSpec {
    pub order: ArimaOrder,
    pub seasonal: SeasonalOrder,
}

impl SarimaSpec {
    pub fn new(order: ArimaOrder, seasonal: SeasonalOrder) -> Self {
        Self { order, seasonal }
    }

    /// Check that the seasonal period can carry the requested seasonal terms
    pub fn validate(&self) -> PipelineResult<()> {
        if self.seasonal.is_seasonal() && self.seasonal.s < 2 {
            return Err(PipelineError::Validation(format!(
                "seasonal period must be at least 2 when seasonal terms are used, got {}",
                self.seasonal.s
            )));
        }
        Ok(())
    }

    /// Period used for seasonal lags (0 when the model is not seasonal)
    pub fn period(&self) -> usize {
        if self.seasonal.is_seasonal() {
            self.seasonal.s
        } else {
            0
        }
    }

    /// Number of ARMA coefficients (excluding the innovation variance)
    pub fn num_coefficients(&self) -> usize {
        self.order.p + self.order.q + self.seasonal.p + self.seasonal.q
    }

    /// Observations consumed by differencing
    pub fn differencing_loss(&self) -> usize {
        self.order.d + self.seasonal.d * self.period()
    }
}

impl fmt::Display for SarimaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seasonal.is_seasonal() {
            write!(f, "SARIMAX{}x{}", self.order, self.seasonal)
        } else {
            write!(f, "SARIMAX{}", self.order)
        }
    }
}

fn parse_usize_list(s: &str, expected: usize, what: &str) -> PipelineResult<Vec<usize>> {
    let parts: Vec<usize> = s
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(|p| p.trim().parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|e| PipelineError::Validation(format!("invalid {} '{}': {}", what, s, e)))?;

    if parts.len() != expected {
        return Err(PipelineError::Validation(format!(
            "invalid {} '{}': expected {} comma-separated values",
            what, s, expected
        )));
    }
    Ok(parts)
}
