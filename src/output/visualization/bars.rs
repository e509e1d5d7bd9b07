//! Bar charts: one labelled bar per configuration, laid out at `i * BAR_WIDTH`

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;

use super::config::PlotConfig;
use super::lines::y_top;
use crate::chart::{BarChart, BAR_WIDTH};

/// Fraction of the slot a bar fills
const BAR_FILL: f64 = 0.8;

/// Draw a bar chart on any drawing area
///
/// Bars keep the positions computed during assembly. Each label is written
/// centered under its bar, in the x label area.
pub(crate) fn draw_bars_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &BarChart,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let display = &chart.display;
    let half = BAR_WIDTH * BAR_FILL / 2.0;
    let last = chart.bars.last().map(|b| b.position).unwrap_or(0.0);

    root.fill(&config.background)?;

    let mut builder = ChartBuilder::on(root);
    builder.margin(15).x_label_area_size(50).y_label_area_size(70);
    if let Some(title) = &display.title {
        builder.caption(title, ("sans-serif", config.title_size as f64).into_font());
    }
    let mut plot = builder.build_cartesian_2d(-BAR_WIDTH..last + BAR_WIDTH, 0.0..y_top(chart.y_max()))?;

    let tick_format = display.y_format;
    let y_formatter = |y: &f64| tick_format.format(*y);
    // Bar positions are not meaningful values; labels are drawn below
    let x_formatter = |_: &f64| String::new();

    let mut mesh = plot.configure_mesh();
    mesh.disable_x_mesh()
        .x_label_formatter(&x_formatter)
        .x_desc(&display.x_label)
        .y_desc(&display.y_label)
        .y_label_formatter(&y_formatter);
    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_y_mesh().draw()?;
    }

    plot.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        Rectangle::new(
            [(bar.position - half, 0.0), (bar.position + half, bar.summary.mid)],
            config.get_series_color(i).mix(0.8).filled(),
        )
    }))?;

    if display.error_bars {
        plot.draw_series(chart.bars.iter().map(|bar| {
            ErrorBar::new_vertical(
                bar.position,
                bar.summary.low,
                bar.summary.mid,
                bar.summary.high,
                BLACK.stroke_width(1),
                config.cap_width,
            )
        }))?;
    }

    // Labels go under the axis, in area-relative pixels
    let (base_x, base_y) = root.get_base_pixel();
    let label_style = ("sans-serif", 16)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for bar in &chart.bars {
        let (x, y) = plot.backend_coord(&(bar.position, 0.0));
        root.draw(&Text::new(
            bar.label.as_str(),
            (x - base_x, y - base_y + 6),
            label_style.clone(),
        ))?;
    }

    Ok(())
}
