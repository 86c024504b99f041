//! Core types for candlefold OHLC resampling.
//!
//! This crate provides the fundamental data structures used throughout
//! candlefold:
//!
//! - [`Bar`] - One resampled OHLCV bar (open/high/low/close/volume)
//! - [`Timeframe`] - Named bucket width for time-based resampling

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlefold/candlefold/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod timeframe;

pub use bar::Bar;
pub use timeframe::{Timeframe, TimeframeParseError};
