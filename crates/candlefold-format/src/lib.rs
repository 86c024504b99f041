//! Output formatters for candlefold resampled bars.
//!
//! This crate provides formatters for writing resampled bars to various
//! output formats:
//!
//! - [`CsvFormatter`] - quoted CSV
//! - [`JsonFormatter`] - JSON array or NDJSON format

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlefold/candlefold/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter};
pub use json::{JsonFormatter, JsonStyle};
