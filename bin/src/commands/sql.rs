//! Sql command implementation.
//!
//! Prints the resample statement that would run, without touching any
//! database.

use anyhow::Result;
use candlefold_lib::prelude::*;

pub(crate) fn print_sql(table: &str, time_column: &str, timeframe: &str) -> Result<()> {
    let timeframe: Timeframe = timeframe.parse()?;
    let plan = ResamplePlan::new(timeframe)
        .with_table(table)
        .with_time_column(time_column);
    println!("{}", plan.sql());
    Ok(())
}
