//! Deterministic demo-data seeding.
//!
//! The resampler needs a table of minute bars to chew on. The seeder writes
//! a random walk: each bar opens at the previous close and drifts by bounded
//! deltas. A fixed RNG seed makes runs reproducible.

use chrono::{NaiveDateTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::params;
use tracing::info;

use crate::database::Database;
use crate::error::Result;
use crate::query::{DEFAULT_TABLE, DEFAULT_TIME_COLUMN, quote_ident};

/// Parameters for generating a demo table of one-minute bars.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan {
    table: String,
    time_column: String,
    start: NaiveDateTime,
    minutes: u32,
    start_price: f64,
    rng_seed: u64,
}

impl SeedPlan {
    /// Creates a plan writing `minutes` one-minute bars starting at `start`.
    #[must_use]
    pub fn new(start: NaiveDateTime, minutes: u32) -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            time_column: DEFAULT_TIME_COLUMN.to_string(),
            start,
            minutes,
            start_price: 100.0,
            rng_seed: 42,
        }
    }

    /// Sets the target table name.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Sets the timestamp column name.
    #[must_use]
    pub fn with_time_column(mut self, time_column: impl Into<String>) -> Self {
        self.time_column = time_column.into();
        self
    }

    /// Sets the opening price of the random walk.
    #[must_use]
    pub const fn with_start_price(mut self, price: f64) -> Self {
        self.start_price = price;
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }
}

impl Database {
    /// Creates the bar table if needed and fills it with a seeded random
    /// walk of one-minute bars.
    ///
    /// Runs in a single transaction and returns the number of bars inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if table creation or any insert fails.
    pub fn seed(&mut self, plan: &SeedPlan) -> Result<usize> {
        let table = quote_ident(&plan.table);
        let ts_col = quote_ident(&plan.time_column);
        let index = quote_ident(&format!("idx_{}_{}", plan.table, plan.time_column));

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (\
                 {ts_col} TIMESTAMP NOT NULL, \
                 open REAL NOT NULL, high REAL NOT NULL, low REAL NOT NULL, \
                 close REAL NOT NULL, volume REAL NOT NULL); \
             CREATE INDEX IF NOT EXISTS {index} ON {table} ({ts_col})"
        ))?;

        let mut rng = StdRng::seed_from_u64(plan.rng_seed);
        let mut price = plan.start_price;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} ({ts_col}, open, high, low, close, volume) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
            ))?;
            for minute in 0..plan.minutes {
                let stamp = plan.start + TimeDelta::minutes(i64::from(minute));
                let open = price;
                let close = open + rng.random_range(-0.5..0.5);
                let high = open.max(close) + rng.random_range(0.0..0.25);
                let low = open.min(close) - rng.random_range(0.0..0.25);
                let volume = f64::from(rng.random_range(100_u32..10_000));
                stmt.execute(params![stamp, open, high, low, close, volume])?;
                price = close;
            }
        }
        tx.commit()?;

        info!(table = %plan.table, bars = plan.minutes, "seeded demo data");
        Ok(plan.minutes as usize)
    }
}
