//! Chronological train/test split

use tracing::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::models::MonthlySeries;

/// Index where the test segment starts: `max(1, floor(n * (1 - ratio)))`
///
/// The training segment always keeps at least one point; the test segment
/// is empty when the floor reaches `n`.
pub fn split_index(n: usize, test_ratio: f64) -> PipelineResult<usize> {
    if !test_ratio.is_finite() || test_ratio <= 0.0 || test_ratio >= 1.0 {
        return Err(PipelineError::Validation(format!(
            "test ratio must lie strictly between 0 and 1, got {}",
            test_ratio
        )));
    }

    let index = (n as f64 * (1.0 - test_ratio)).floor() as usize;
    Ok(index.max(1))
}

/// Split a series into a leading training prefix and a trailing test suffix
pub fn time_split(
    series: &MonthlySeries,
    test_ratio: f64,
) -> PipelineResult<(MonthlySeries, MonthlySeries)> {
    let at = split_index(series.len(), test_ratio)?;
    let (train, test) = series.split_at(at);
    debug!(train = train.len(), test = test.len(), "Split monthly series");
    Ok((train, test))
}
