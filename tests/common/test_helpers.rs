//! Assertion helpers shared by integration tests

use benchplot::chart::{AssembledChart, BarChart, LineChart};

/// Relative error between a computed and an expected value
pub fn relative_error(computed: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-12 {
        computed.abs()
    } else {
        ((computed - expected) / expected).abs()
    }
}

pub fn expect_lines(chart: AssembledChart) -> LineChart {
    match chart {
        AssembledChart::Lines(lines) => lines,
        AssembledChart::Bars(bars) => panic!("expected a line chart, got bars {}", bars.name),
    }
}

pub fn expect_bars(chart: AssembledChart) -> BarChart {
    match chart {
        AssembledChart::Bars(bars) => bars,
        AssembledChart::Lines(lines) => panic!("expected a bar chart, got lines {}", lines.name),
    }
}
