//! Revenue line charts: the train/test split and the forecast comparison

use std::path::Path;

use plotters::prelude::*;

use super::{padded_range, render, DrawResult, FONT_FAMILY};
use crate::display::format_thousands;
use crate::error::PipelineResult;
use crate::models::{Month, MonthlySeries};
use crate::reports::ForecastAccuracy;

const WIDTH: u32 = 1500;
const HEIGHT: u32 = 750;

const TRAIN_COLOR: RGBColor = RGBColor(31, 119, 180);
const ACTUAL_COLOR: RGBColor = RGBColor(255, 127, 14);
const FORECAST_COLOR: RGBColor = RGBColor(44, 160, 44);

/// A named line on a revenue chart
struct Line<'a> {
    label: &'static str,
    series: &'a MonthlySeries,
    color: RGBColor,
}

/// Title of the forecast chart, metrics rounded to whole units
pub fn forecast_title(accuracy: &ForecastAccuracy) -> String {
    format!(
        "Forecast vs Actual | MAE={} RMSE={}",
        format_thousands(accuracy.mae, 0),
        format_thousands(accuracy.rmse, 0)
    )
}

/// Training and test segments on one chart
pub fn plot_train_test(path: &Path, train: &MonthlySeries, test: &MonthlySeries) -> PipelineResult<()> {
    let lines = [
        Line {
            label: "Train",
            series: train,
            color: TRAIN_COLOR,
        },
        Line {
            label: "Test",
            series: test,
            color: ACTUAL_COLOR,
        },
    ];
    render(path, || draw_lines(path, "Monthly Revenue (Train/Test)", &lines))
}

/// Training segment, observed test values and the forecast
pub fn plot_forecast(
    path: &Path,
    train: &MonthlySeries,
    test: &MonthlySeries,
    forecast: &MonthlySeries,
    accuracy: &ForecastAccuracy,
) -> PipelineResult<()> {
    let lines = [
        Line {
            label: "Train",
            series: train,
            color: TRAIN_COLOR,
        },
        Line {
            label: "Actual",
            series: test,
            color: ACTUAL_COLOR,
        },
        Line {
            label: "Forecast",
            series: forecast,
            color: FORECAST_COLOR,
        },
    ];
    let title = forecast_title(accuracy);
    render(path, || draw_lines(path, &title, &lines))
}

fn draw_lines(path: &Path, title: &str, lines: &[Line<'_>]) -> DrawResult {
    let months: Vec<i32> = lines
        .iter()
        .flat_map(|line| line.series.months())
        .map(|m| m.ordinal())
        .collect();
    let first = months.iter().copied().min().unwrap_or(0);
    let last = months.iter().copied().max().unwrap_or(first);
    let values = lines.iter().flat_map(|line| line.series.values());

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT_FAMILY, 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(110)
        .build_cartesian_2d(first..last + 1, padded_range(values))?;

    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&|x| Month::from_ordinal(*x).label())
        .y_label_formatter(&|y| format_thousands(*y, 0))
        .x_desc("Month")
        .y_desc("Revenue")
        .label_style((FONT_FAMILY, 16))
        .draw()?;

    for line in lines {
        let color = line.color;
        let points: Vec<(i32, f64)> = line
            .series
            .points()
            .iter()
            .filter(|p| p.value.is_finite())
            .map(|p| (p.month.ordinal(), p.value))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT_FAMILY, 18))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
