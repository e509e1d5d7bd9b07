//! Output of assembled charts
//!
//! - **Pages**: one rendered file per chart ([`PageRenderer`])
//! - **Document**: all pages of a report combined into one file ([`DocumentAssembler`])
//! - **Export**: the numbers behind a chart as CSV ([`export`])
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← renderer and document traits, plotters implementations
//! ├── visualization/      ← drawing with plotters
//! │   ├── config.rs
//! │   ├── lines.rs
//! │   └── bars.rs
//! └── export/             ← data export
//!     └── csv.rs
//! ```
//!
//! Both traits are seams: the report pipeline only talks to them, so tests can
//! record what would have been drawn, and a different backend can replace
//! plotters without touching assembly.

pub mod export;
pub mod visualization;

pub use export::{export_chart_csv, CsvConfig, CsvExporter, CsvMetadata, Exporter};
pub use visualization::{plot_chart, plot_panels, PlotConfig};

use std::path::{Path, PathBuf};

use crate::chart::AssembledChart;
use crate::error::{Error, Result};

/// One rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// File the page was written to
    pub path: PathBuf,
    /// Chart drawn on the page
    pub chart: AssembledChart,
}

/// Draws one chart to its own file
pub trait PageRenderer {
    fn render_page(&self, chart: &AssembledChart, path: &Path) -> Result<Page>;
}

/// Combines rendered pages into the report document, in order
pub trait DocumentAssembler {
    fn assemble(&self, pages: &[Page], path: &Path) -> Result<()>;
}

// =================================================================================================
// plotters implementations
// =================================================================================================

/// [`PageRenderer`] drawing with plotters (SVG or PNG by extension)
#[derive(Debug, Clone, Default)]
pub struct PlottersRenderer {
    pub config: PlotConfig,
}

impl PlottersRenderer {
    pub fn new(config: PlotConfig) -> Self {
        Self { config }
    }
}

impl PageRenderer for PlottersRenderer {
    fn render_page(&self, chart: &AssembledChart, path: &Path) -> Result<Page> {
        plot_chart(chart, path, Some(&self.config)).map_err(|e| Error::render(path, e))?;
        Ok(Page {
            path: path.to_path_buf(),
            chart: chart.clone(),
        })
    }
}

/// [`DocumentAssembler`] stacking every page as a panel of one image
#[derive(Debug, Clone, Default)]
pub struct PanelDocument {
    pub config: PlotConfig,
}

impl PanelDocument {
    pub fn new(config: PlotConfig) -> Self {
        Self { config }
    }
}

impl DocumentAssembler for PanelDocument {
    fn assemble(&self, pages: &[Page], path: &Path) -> Result<()> {
        let charts: Vec<&AssembledChart> = pages.iter().map(|p| &p.chart).collect();
        plot_panels(&charts, path, Some(&self.config)).map_err(|e| Error::render(path, e))?;
        log::info!("document with {} page(s) written to {}", pages.len(), path.display());
        Ok(())
    }
}
