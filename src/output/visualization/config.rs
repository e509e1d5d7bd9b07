//! Plot configuration shared by the line, bar and document renderers

use plotters::prelude::*;

use crate::chart::LegendPosition;

/// Page geometry and styling
///
/// Text that belongs to a chart (title, axis labels, tick format, legend
/// placement) lives in the chart description; this only holds what is common
/// to every page of a report.
///
/// # Example
///
/// ```rust,ignore
/// use benchplot::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::default();
/// config.width = 1600;
/// config.series_colors = Some(vec![BLACK, RED, BLUE]);
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Page width in pixels (default: 1024)
    pub width: u32,

    /// Page height in pixels (default: 768)
    pub height: u32,

    /// Colors for series and bars, cycled; `None` uses the builtin palette
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Width in pixels of the error bar caps (default: 8)
    pub cap_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Title font size (default: 32)
    pub title_size: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            cap_width: 8,
            show_grid: true,
            title_size: 32,
        }
    }
}

impl PlotConfig {
    /// Builder pattern: page size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Config for a bar chart page, half as wide as a line chart page
    pub fn bar_page(&self) -> Self {
        Self {
            width: (self.width / 2).max(1),
            ..self.clone()
        }
    }

    /// Color of the series or bar at index `i`
    pub(crate) fn get_series_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = self.series_colors.as_ref().filter(|c| !c.is_empty()) {
            return colors[index % colors.len()];
        }

        let palette = [
            BLACK,
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            RGBColor(255, 165, 0), // Orange
            CYAN,
            RGBColor(128, 0, 128), // Purple
            RGBColor(165, 42, 42), // Brown
        ];
        palette[index % palette.len()]
    }
}

/// Where plotters puts the series labels for a legend position
pub(crate) fn legend_anchor(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        LegendPosition::UpperMiddle => SeriesLabelPosition::UpperMiddle,
        LegendPosition::LowerMiddle => SeriesLabelPosition::LowerMiddle,
    }
}
