//! Line charts: one median line per series with min/max error bars

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;

use super::config::{legend_anchor, PlotConfig};
use crate::chart::LineChart;

/// Smallest y range drawn when every value is zero
const MIN_Y_TOP: f64 = 1.0;

/// Top of the y axis: 10% headroom over the largest upper bound
pub(crate) fn y_top(y_max: f64) -> f64 {
    if y_max > 0.0 {
        y_max * 1.1
    } else {
        MIN_Y_TOP
    }
}

/// X range covering every point, padded by 5% on each side
fn x_range(chart: &LineChart) -> (f64, f64) {
    let (lo, hi) = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.x))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad, hi + pad)
}

/// Draw a line chart on any drawing area
///
/// The y axis always starts at 0. Each series gets a palette color, a median
/// line with point markers, and (when the chart asks for them) vertical error
/// bars from the lowest to the highest trial.
pub(crate) fn draw_lines_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &LineChart,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let display = &chart.display;
    let (x_lo, x_hi) = x_range(chart);

    root.fill(&config.background)?;

    let mut builder = ChartBuilder::on(root);
    builder.margin(15).x_label_area_size(50).y_label_area_size(70);
    if let Some(title) = &display.title {
        builder.caption(title, ("sans-serif", config.title_size as f64).into_font());
    }
    let mut plot = builder.build_cartesian_2d(x_lo..x_hi, 0.0..y_top(chart.y_max()))?;

    let tick_format = display.y_format;
    let y_formatter = |y: &f64| tick_format.format(*y);
    let x_formatter = |x: &f64| format!("{:.0}", x);

    let mut mesh = plot.configure_mesh();
    mesh.x_desc(&display.x_label)
        .y_desc(&display.y_label)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter);
    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    for (i, series) in chart.series.iter().enumerate() {
        let color = config.get_series_color(i);
        let width = config.line_width;

        plot.draw_series(LineSeries::new(
            series.points.iter().map(|p| (p.x, p.summary.mid)),
            color.stroke_width(width),
        ))?
        .label(series.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width)));

        plot.draw_series(
            series
                .points
                .iter()
                .map(|p| Circle::new((p.x, p.summary.mid), 3, color.filled())),
        )?;

        if display.error_bars {
            plot.draw_series(series.points.iter().map(|p| {
                ErrorBar::new_vertical(
                    p.x,
                    p.summary.low,
                    p.summary.mid,
                    p.summary.high,
                    color.stroke_width(1),
                    config.cap_width,
                )
            }))?;
        }
    }

    plot.configure_series_labels()
        .position(legend_anchor(display.legend))
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Display, LegendPosition, Point, Series, TickFormat};
    use crate::extract::Observation;
    use crate::stats::Summary;

    fn point(x: f64, mid: f64) -> Point {
        Point {
            x,
            y: Observation::Single(mid),
            summary: Summary::point(mid),
        }
    }

    fn chart(series: Vec<Series>) -> LineChart {
        LineChart {
            name: "t".to_string(),
            display: Display {
                title: None,
                x_label: String::new(),
                y_label: String::new(),
                legend: LegendPosition::UpperLeft,
                y_format: TickFormat::Plain,
                error_bars: true,
            },
            series,
        }
    }

    #[test]
    fn test_y_top_headroom() {
        assert_eq!(y_top(0.0), MIN_Y_TOP);
        assert!((y_top(100.0) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_x_range_pads_span() {
        let c = chart(vec![Series {
            label: "a".into(),
            points: vec![point(1.0, 1.0), point(21.0, 2.0)],
            broadcast: false,
        }]);
        let (lo, hi) = x_range(&c);
        assert!((lo - 0.0).abs() < 1e-9);
        assert!((hi - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_x_range_single_point() {
        let c = chart(vec![Series {
            label: "a".into(),
            points: vec![point(4.0, 1.0)],
            broadcast: false,
        }]);
        assert_eq!(x_range(&c), (3.0, 5.0));
    }
}
