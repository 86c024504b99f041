//! Database handle with the resampling aggregates registered.

use std::path::Path;

use candlefold_types::Bar;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{ResampleError, Result};
use crate::functions::register_aggregates;
use crate::query::ResamplePlan;

/// A SQLite database with the `first`/`last` aggregates registered.
///
/// Registration happens on every connect, so any statement run through this
/// handle can use the custom aggregates.
#[derive(Debug)]
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Opens (or creates) a database file for reading and writing.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| ResampleError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Opens an existing database file read-only.
    ///
    /// Resampling never creates a database, so a missing file is an error
    /// here rather than a silently created empty database.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::Open`] if the file is missing or cannot be
    /// opened.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
            | OpenFlags::SQLITE_OPEN_URI;
        let conn =
            Connection::open_with_flags(path, flags).map_err(|source| ResampleError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::with_connection(conn)
    }

    /// Opens an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot create the connection.
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        register_aggregates(&conn)?;
        Ok(Self { conn })
    }

    /// Borrows the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Runs a resample query and maps the grouped rows into bars.
    ///
    /// One bar is produced per non-empty bucket; empty buckets produce no
    /// row at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails or a result column cannot be
    /// mapped.
    pub fn resample(&self, plan: &ResamplePlan) -> Result<Vec<Bar>> {
        let sql = plan.sql();
        debug!(%sql, "running resample query");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut bars = Vec::new();
        while let Some(row) = rows.next()? {
            let bucket_ts: NaiveDateTime = row.get("bucket_ts")?;
            let open: Option<String> = row.get("open")?;
            let high: f64 = row.get("high")?;
            let low: f64 = row.get("low")?;
            let close: Option<String> = row.get("close")?;
            let volume: f64 = row.get("volume")?;
            let row_count: u64 = row.get("row_count")?;
            bars.push(Bar::new(
                bucket_ts.and_utc(),
                parse_aggregate("open", open)?,
                high,
                low,
                parse_aggregate("close", close)?,
                volume,
                row_count,
            ));
        }
        debug!(bars = bars.len(), "resample complete");
        Ok(bars)
    }
}

/// Parses the text a first/last aggregate produced into a price.
fn parse_aggregate(column: &'static str, value: Option<String>) -> Result<f64> {
    let text = value.ok_or(ResampleError::NullAggregate { column })?;
    match text.parse() {
        Ok(price) => Ok(price),
        Err(_) => Err(ResampleError::NonNumeric {
            column,
            value: text,
        }),
    }
}
