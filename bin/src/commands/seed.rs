//! Seed command implementation.
//!
//! Creates a demo table of random-walk minute bars so the resampler has
//! something to work on.

use anyhow::{Context, Result};
use candlefold_lib::prelude::*;
use chrono::{NaiveDateTime, TimeDelta, Timelike, Utc};
use std::path::Path;

pub(crate) fn seed(
    database: &Path,
    table: &str,
    time_column: &str,
    minutes: u32,
    start: Option<&str>,
    price: f64,
    rng_seed: u64,
) -> Result<()> {
    let start = match start {
        Some(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
            .with_context(|| format!("invalid start timestamp: {text}"))?,
        None => {
            let now = Utc::now().naive_utc();
            let aligned = now
                .with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(now);
            aligned - TimeDelta::minutes(i64::from(minutes))
        }
    };

    let mut db = Database::open(database)?;
    let plan = SeedPlan::new(start, minutes)
        .with_table(table)
        .with_time_column(time_column)
        .with_start_price(price)
        .with_rng_seed(rng_seed);
    let inserted = db.seed(&plan)?;

    println!("Seeded {inserted} minute bars into {table}");
    Ok(())
}
