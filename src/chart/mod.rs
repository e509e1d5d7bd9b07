//! Chart descriptions and their assembly into plottable data
//!
//! [`spec`] holds the declarative side (what to plot), [`assemble`] applies it
//! to a record list and produces [`AssembledChart`] values for the renderers.

pub mod assemble;
pub mod spec;

pub use assemble::{
    assemble, assemble_bars, assemble_lines, AssembledChart, Bar, BarChart, Display, LineChart,
    Point, Series, BAR_WIDTH,
};
pub use spec::{BarSpec, ChartKind, ChartSpec, LegendPosition, SeriesSpec, TickFormat};
