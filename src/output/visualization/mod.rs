//! Chart rendering with `plotters`
//!
//! # Organization
//!
//! - **config**: shared page configuration (`PlotConfig`)
//! - **lines**: line charts with median lines and error bars
//! - **bars**: bar charts, one bar per matched configuration
//!
//! The backend is chosen from the file extension: `.svg` gives a vector page,
//! anything else a bitmap (PNG).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use benchplot::output::visualization::{plot_chart, plot_panels, PlotConfig};
//!
//! let chart = benchplot::chart::assemble(&spec, &records)?;
//! plot_chart(&chart, Path::new("scale.svg"), None)?;
//!
//! // Every chart of a report on one page, top to bottom
//! plot_panels(&[&scale, &per_core], Path::new("report.svg"), None)?;
//! ```

pub mod bars;
pub mod config;
pub mod lines;

pub use config::PlotConfig;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use crate::chart::AssembledChart;

/// Whether a path asks for a vector page
fn is_svg(output_path: &Path) -> bool {
    output_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Draw any assembled chart on a drawing area
pub(crate) fn draw_chart_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &AssembledChart,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    match chart {
        AssembledChart::Lines(lines) => lines::draw_lines_on_area(root, lines, config),
        AssembledChart::Bars(bars) => bars::draw_bars_on_area(root, bars, config),
    }
}

/// Render one chart to its own page
///
/// Bar charts are drawn on a half-width page.
///
/// # Errors
///
/// Returns `Err` if the backend cannot draw or write `output_path`.
pub fn plot_chart(
    chart: &AssembledChart,
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);
    let config = match chart {
        AssembledChart::Bars(_) => config.bar_page(),
        AssembledChart::Lines(_) => config.clone(),
    };
    let size = (config.width, config.height);

    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_chart_on_area(&root, chart, &config)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_chart_on_area(&root, chart, &config)?;
        root.present()?;
    }
    log::debug!("chart {} written to {}", chart.name(), output_path.display());
    Ok(())
}

/// Render several charts stacked top to bottom on one page
///
/// Each panel is `config.width` x `config.height`.
///
/// # Errors
///
/// Returns `Err` if `charts` is empty or the backend fails.
pub fn plot_panels(
    charts: &[&AssembledChart],
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if charts.is_empty() {
        return Err("No charts provided".into());
    }

    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);
    let size = (config.width, config.height * charts.len() as u32);

    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_panels(&root, charts, config)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_panels(&root, charts, config)?;
        root.present()?;
    }
    Ok(())
}

fn draw_panels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    charts: &[&AssembledChart],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&config.background)?;
    let panels = root.split_evenly((charts.len(), 1));
    for (panel, chart) in panels.iter().zip(charts) {
        draw_chart_on_area(panel, chart, config)?;
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
