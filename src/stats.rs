//! Aggregation of repeated trial values
//!
//! Each plotted point is a sample of trial values reduced to a point estimate
//! (the median) and an asymmetric spread (`median - min`, `max - median`) for
//! error bars.
//!
//! # Median convention
//!
//! [`median`] returns `sorted[len / 2]`. For even lengths this is the upper
//! of the two middle values, not their average.

use crate::error::{Error, Result};

/// Median as `sorted[len / 2]`
///
/// # Errors
///
/// `EmptySample` if `xs` is empty.
pub fn median(xs: &[f64]) -> Result<f64> {
    if xs.is_empty() {
        return Err(Error::EmptySample);
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(sorted[sorted.len() / 2])
}

/// Arithmetic mean
pub fn mean(xs: &[f64]) -> Result<f64> {
    if xs.is_empty() {
        return Err(Error::EmptySample);
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

pub fn min(xs: &[f64]) -> Result<f64> {
    xs.iter().copied().reduce(f64::min).ok_or(Error::EmptySample)
}

pub fn max(xs: &[f64]) -> Result<f64> {
    xs.iter().copied().reduce(f64::max).ok_or(Error::EmptySample)
}

/// Lower and upper error: `(median - min, max - median)`
pub fn error_span(xs: &[f64]) -> Result<(f64, f64)> {
    let mid = median(xs)?;
    Ok((mid - min(xs)?, max(xs)? - mid))
}

/// Point estimate with its min/max spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl Summary {
    /// Summary of a degenerate sample of one value
    pub fn point(value: f64) -> Self {
        Self {
            low: value,
            mid: value,
            high: value,
        }
    }

    pub fn of(xs: &[f64]) -> Result<Self> {
        Ok(Self {
            low: min(xs)?,
            mid: median(xs)?,
            high: max(xs)?,
        })
    }

    /// `(mid - low, high - mid)`, the error-bar lengths
    pub fn errors(&self) -> (f64, f64) {
        (self.mid - self.low, self.high - self.mid)
    }
}
