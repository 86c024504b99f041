//! Resample command implementation.
//!
//! Opens the database read-only, runs the grouped resample query through
//! the custom first/last aggregates, and writes the bars to stdout or a
//! file.

use anyhow::{Context, Result};
use candlefold_lib::prelude::*;
use std::path::{Path, PathBuf};

use crate::display::{Format, write_bars};

pub(crate) fn resample(
    database: &Path,
    table: &str,
    time_column: &str,
    timeframe: &str,
    output: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let timeframe: Timeframe = timeframe.parse()?;

    let db = Database::open_read_only(database)?;
    let plan = ResamplePlan::new(timeframe)
        .with_table(table)
        .with_time_column(time_column);
    let bars = db
        .resample(&plan)
        .with_context(|| format!("resampling {table} to {timeframe} buckets failed"))?;

    write_bars(&bars, output.as_ref(), format)
}
