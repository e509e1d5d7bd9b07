//! Common utilities for integration tests
#![allow(dead_code)]

pub mod fixtures;
pub mod test_helpers;

pub use fixtures::{abc_records, multipart_record, scale_record, tpcc_record, trial_record};
pub use test_helpers::{expect_bars, expect_lines, relative_error};
