//! PNG charts written at the end of a run
//!
//! Rendering uses the plotters bitmap backend with a font embedded in the
//! binary, so no system font lookup happens at runtime.

pub mod diagnostics;
pub mod series;

use std::error::Error;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};

use crate::error::{PipelineError, PipelineResult};

pub use diagnostics::plot_diagnostics;
pub use series::{forecast_title, plot_forecast, plot_train_test};

/// Family name the chart text styles refer to
pub(crate) const FONT_FAMILY: &str = "sans-serif";

static EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Result type of the drawing code, converted to [`PipelineError::Render`] at
/// the module boundary
pub(crate) type DrawResult = Result<(), Box<dyn Error>>;

/// Register the embedded font once per process
fn ensure_font() -> PipelineResult<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered = *REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, EMBEDDED_FONT).is_ok());
    if registered {
        Ok(())
    } else {
        Err(PipelineError::Render(
            "embedded chart font could not be loaded".into(),
        ))
    }
}

/// Run a drawing routine for `path`, mapping any backend failure
pub(crate) fn render<F>(path: &Path, draw: F) -> PipelineResult<()>
where
    F: FnOnce() -> DrawResult,
{
    ensure_font()?;
    draw().map_err(|e| PipelineError::Render(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), "Rendered chart");
    Ok(())
}

/// Axis range covering the finite values with a 5% margin on each side
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return 0.0..1.0;
    }
    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (min.abs() * 0.05).max(1.0)
    };
    (min - pad)..(max + pad)
}
