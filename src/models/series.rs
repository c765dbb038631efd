//! Monthly revenue series
//!
//! An ordered sequence of `(month, value)` points with strictly increasing
//! month keys. The same shape carries the cleaned revenue, the train/test
//! segments and the forecast aligned to the test index.

use serde::{Deserialize, Serialize};

use super::Month;
use crate::error::{PipelineError, PipelineResult};

/// One point of a monthly series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: Month,
    pub value: f64,
}

impl MonthlyPoint {
    pub fn new(month: Month, value: f64) -> Self {
        Self { month, value }
    }
}

/// Time-ordered monthly series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    points: Vec<MonthlyPoint>,
}

impl MonthlySeries {
    /// Build a series, rejecting month keys that are not strictly increasing
    pub fn new(points: Vec<MonthlyPoint>) -> PipelineResult<Self> {
        if let Some(pair) = points.windows(2).find(|w| w[0].month >= w[1].month) {
            return Err(PipelineError::Validation(format!(
                "monthly series keys must be strictly increasing ({} then {})",
                pair[0].month, pair[1].month
            )));
        }
        Ok(Self { points })
    }

    /// Pair each month of `index` with the value at the same position
    pub fn with_index(index: &[Month], values: &[f64]) -> PipelineResult<Self> {
        if index.len() != values.len() {
            return Err(PipelineError::Validation(format!(
                "index has {} months but {} values were given",
                index.len(),
                values.len()
            )));
        }
        Self::new(
            index
                .iter()
                .zip(values)
                .map(|(&month, &value)| MonthlyPoint::new(month, value))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[MonthlyPoint] {
        &self.points
    }

    /// Month index in order
    pub fn months(&self) -> Vec<Month> {
        self.points.iter().map(|p| p.month).collect()
    }

    /// Values in order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn first_month(&self) -> Option<Month> {
        self.points.first().map(|p| p.month)
    }

    pub fn last_month(&self) -> Option<Month> {
        self.points.last().map(|p| p.month)
    }

    /// Split into `[0, at)` and `[at, len)`; `at` is clamped to the length
    pub fn split_at(&self, at: usize) -> (Self, Self) {
        let at = at.min(self.points.len());
        let (head, tail) = self.points.split_at(at);
        (
            Self {
                points: head.to_vec(),
            },
            Self {
                points: tail.to_vec(),
            },
        )
    }

    /// Points sorted by value, largest first
    pub fn top_by_value(&self, limit: usize) -> Vec<MonthlyPoint> {
        let mut sorted = self.points.clone();
        sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
        sorted.truncate(limit);
        sorted
    }
}
