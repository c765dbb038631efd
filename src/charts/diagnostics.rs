//! Residual diagnostics panel
//!
//! A 2×2 grid over the standardized residuals of the fitted model:
//! residuals over time, histogram with density estimates, normal Q-Q plot
//! and correlogram.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{padded_range, render, DrawResult, FONT_FAMILY};
use crate::error::PipelineResult;
use crate::stats::descriptive::{acf, gaussian_kde};
use crate::stats::distributions::{normal_pdf, normal_quantile, Z_975};

const WIDTH: u32 = 1800;
const HEIGHT: u32 = 1200;
const MAX_LAG: usize = 10;
const CAPTION_SIZE: i32 = 24;

const PRIMARY: RGBColor = RGBColor(31, 119, 180);
const SECONDARY: RGBColor = RGBColor(255, 127, 14);
const TERTIARY: RGBColor = RGBColor(44, 160, 44);

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Render the diagnostics panel for `standardized` residuals
pub fn plot_diagnostics(path: &Path, standardized: &[f64]) -> PipelineResult<()> {
    let residuals: Vec<f64> = standardized.iter().copied().filter(|v| v.is_finite()).collect();
    render(path, || {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let panels = root.split_evenly((2, 2));
        draw_residuals(&panels[0], &residuals)?;
        draw_histogram(&panels[1], &residuals)?;
        draw_qq(&panels[2], &residuals)?;
        draw_correlogram(&panels[3], &residuals)?;

        root.present()?;
        Ok(())
    })
}

fn draw_residuals(area: &Panel<'_>, residuals: &[f64]) -> DrawResult {
    let n = residuals.len().max(1) as f64;
    let mut chart = ChartBuilder::on(area)
        .caption("Standardized residual", (FONT_FAMILY, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..n, padded_range(residuals.iter().copied().chain([0.0])))?;
    chart.configure_mesh().label_style((FONT_FAMILY, 14)).draw()?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (n, 0.0)],
        BLACK.mix(0.5),
    )))?;
    chart.draw_series(LineSeries::new(
        residuals.iter().enumerate().map(|(i, &r)| (i as f64, r)),
        PRIMARY.stroke_width(2),
    ))?;
    Ok(())
}

/// Number of histogram bins (Sturges' rule)
fn bin_count(n: usize) -> usize {
    ((n.max(1) as f64).log2().ceil() as usize + 1).max(1)
}

fn draw_histogram(area: &Panel<'_>, residuals: &[f64]) -> DrawResult {
    let lo = residuals.iter().copied().fold(-3.0f64, f64::min);
    let hi = residuals.iter().copied().fold(3.0f64, f64::max);

    let bins = bin_count(residuals.len());
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &r in residuals {
        let bin = (((r - lo) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    let scale = 1.0 / (residuals.len().max(1) as f64 * width);
    let densities: Vec<f64> = counts.iter().map(|&c| c as f64 * scale).collect();

    let grid: Vec<f64> = (0..=200).map(|i| lo + (hi - lo) * i as f64 / 200.0).collect();
    let kde = gaussian_kde(residuals, &grid);
    let normal: Vec<f64> = grid.iter().map(|&x| normal_pdf(x)).collect();

    let top = densities
        .iter()
        .chain(&kde)
        .chain(&normal)
        .copied()
        .fold(0.0f64, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Histogram plus estimated density", (FONT_FAMILY, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(lo..hi, 0.0..top)?;
    chart.configure_mesh().label_style((FONT_FAMILY, 14)).draw()?;

    chart
        .draw_series(densities.iter().enumerate().map(|(i, &d)| {
            let x0 = lo + i as f64 * width;
            Rectangle::new([(x0, 0.0), (x0 + width, d)], PRIMARY.mix(0.4).filled())
        }))?
        .label("Hist")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], PRIMARY.mix(0.4).filled()));

    chart
        .draw_series(LineSeries::new(
            grid.iter().copied().zip(kde),
            SECONDARY.stroke_width(2),
        ))?
        .label("KDE")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SECONDARY.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            grid.iter().copied().zip(normal),
            TERTIARY.stroke_width(2),
        ))?
        .label("N(0,1)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TERTIARY.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT_FAMILY, 14))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Sorted sample against standard normal quantiles at `i / (n + 1)`
fn qq_points(residuals: &[f64]) -> Vec<(f64, f64)> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, r)| (normal_quantile((i + 1) as f64 / (n + 1.0)), r))
        .collect()
}

fn draw_qq(area: &Panel<'_>, residuals: &[f64]) -> DrawResult {
    let points = qq_points(residuals);
    let range = padded_range(points.iter().flat_map(|&(x, y)| [x, y]).chain([-2.0, 2.0]));

    let mut chart = ChartBuilder::on(area)
        .caption("Normal Q-Q", (FONT_FAMILY, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(range.clone(), range.clone())?;
    chart
        .configure_mesh()
        .x_desc("Theoretical Quantiles")
        .y_desc("Sample Quantiles")
        .label_style((FONT_FAMILY, 14))
        .draw()?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(range.start, range.start), (range.end, range.end)],
        SECONDARY.stroke_width(2),
    )))?;
    chart.draw_series(
        points
            .into_iter()
            .map(|p| Circle::new(p, 4, PRIMARY.filled())),
    )?;
    Ok(())
}

fn draw_correlogram(area: &Panel<'_>, residuals: &[f64]) -> DrawResult {
    let max_lag = MAX_LAG.min(residuals.len().saturating_sub(1));
    let correlations: Vec<f64> = std::iter::once(1.0)
        .chain(acf(residuals, max_lag))
        .collect();
    let band = Z_975 / (residuals.len().max(1) as f64).sqrt();
    let bottom = correlations.iter().copied().fold(-band, f64::min).min(-0.2) - 0.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Correlogram", (FONT_FAMILY, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..max_lag as f64 + 0.5, bottom..1.1)?;
    chart.configure_mesh().label_style((FONT_FAMILY, 14)).draw()?;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(-0.5, -band), (max_lag as f64 + 0.5, band)],
        PRIMARY.mix(0.15).filled(),
    )))?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(-0.5, 0.0), (max_lag as f64 + 0.5, 0.0)],
        BLACK.mix(0.5),
    )))?;
    chart.draw_series(correlations.iter().enumerate().map(|(lag, &r)| {
        PathElement::new(vec![(lag as f64, 0.0), (lag as f64, r)], PRIMARY.stroke_width(2))
    }))?;
    chart.draw_series(
        correlations
            .iter()
            .enumerate()
            .map(|(lag, &r)| Circle::new((lag as f64, r), 5, PRIMARY.filled())),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bin_count() {
        assert_eq!(bin_count(1), 1);
        assert_eq!(bin_count(6), 4);
        assert_eq!(bin_count(100), 8);
    }

    #[test]
    fn test_qq_points_sorted() {
        let points = qq_points(&[1.5, -0.2, 0.4]);
        assert_eq!(points.len(), 3);
        assert!(points[0].0 < 0.0 && points[2].0 > 0.0);
        assert!(points[1].0.abs() < 1e-9);
        assert_eq!(points[0].1, -0.2);
        assert_eq!(points[2].1, 1.5);
    }

    #[test]
    fn test_diagnostics_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sarimax_diagnostics.png");
        let residuals = [0.3, -1.1, 0.8, 1.9, -0.4, -0.7, 0.1];

        plot_diagnostics(&path, &residuals).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_diagnostics_with_no_residuals() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sarimax_diagnostics.png");
        plot_diagnostics(&path, &[]).unwrap();
        assert!(path.exists());
    }
}
