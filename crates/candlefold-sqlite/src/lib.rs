//! Embedded SQLite layer for candlefold OHLC resampling.
//!
//! This crate owns everything that touches the database engine:
//!
//! - [`FirstByArrival`] / [`LastByArrival`] - custom aggregate functions
//! - [`TextAccumulator`] - the per-group state both aggregates share
//! - [`ResamplePlan`] - grouped resample query construction
//! - [`Database`] - connection handle with the aggregates registered
//! - [`SeedPlan`] - deterministic random-walk demo data

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlefold/candlefold/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accumulator;
mod database;
mod error;
mod functions;
mod query;
mod seed;

pub use accumulator::TextAccumulator;
pub use database::Database;
pub use error::{ResampleError, Result};
pub use functions::{FIRST_FN, FirstByArrival, LAST_FN, LastByArrival, register_aggregates};
pub use query::{DEFAULT_TABLE, DEFAULT_TIME_COLUMN, ResamplePlan};
pub use seed::SeedPlan;
