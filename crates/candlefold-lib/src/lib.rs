//! OHLC resampling over embedded SQLite.
//!
//! This is a facade crate that re-exports functionality from the candlefold
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use candlefold_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::open_read_only("./bars.db")?;
//!     let plan = ResamplePlan::new(Timeframe::Hour2);
//!     let bars = db.resample(&plan)?;
//!
//!     CsvFormatter::new().write_bars(&bars, std::io::stdout())?;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlefold/candlefold/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use candlefold_types::*;

// Re-export the SQLite layer
#[cfg(feature = "sqlite")]
pub use candlefold_sqlite::{
    Database, FIRST_FN, FirstByArrival, LAST_FN, LastByArrival, ResampleError, ResamplePlan,
    SeedPlan, TextAccumulator, register_aggregates,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use candlefold_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle};

/// Prelude module for convenient imports.
///
/// ```
/// use candlefold_lib::prelude::*;
/// ```
pub mod prelude {
    pub use candlefold_types::{Bar, Timeframe, TimeframeParseError};

    #[cfg(feature = "sqlite")]
    pub use candlefold_sqlite::{Database, ResampleError, ResamplePlan, SeedPlan};

    #[cfg(feature = "format")]
    pub use candlefold_format::{CsvFormatter, Formatter, JsonFormatter};
}
