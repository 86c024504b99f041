//! Resample query construction.

use candlefold_types::Timeframe;

/// Default source table name.
pub const DEFAULT_TABLE: &str = "bars";

/// Default timestamp column name.
pub const DEFAULT_TIME_COLUMN: &str = "dateX";

/// A resample query over a table of OHLCV rows.
///
/// The source table must carry the fixed columns `open`, `high`, `low`,
/// `close` and `volume`, plus a timestamp column (TEXT, ISO-8601). Table and
/// timestamp-column names are configurable; both are quoted when the
/// statement is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResamplePlan {
    table: String,
    time_column: String,
    timeframe: Timeframe,
}

impl Default for ResamplePlan {
    fn default() -> Self {
        Self::new(Timeframe::default())
    }
}

impl ResamplePlan {
    /// Creates a plan over the default table and timestamp column.
    #[must_use]
    pub fn new(timeframe: Timeframe) -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            time_column: DEFAULT_TIME_COLUMN.to_string(),
            timeframe,
        }
    }

    /// Sets the source table name.
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

    /// Returns the source table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the timestamp column name.
    #[must_use]
    pub fn time_column(&self) -> &str {
        &self.time_column
    }

    /// Returns the bucket width.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Renders the resample statement.
    ///
    /// Rows are grouped by `unix_seconds / bucket_width`. The `first` and
    /// `last` aggregates reduce by order of arrival, so the source is a
    /// subquery ordered by the timestamp column: SQLite does not flatten an
    /// ordered subquery under an outer GROUP BY, which makes arrival order
    /// equal timestamp order and first/last chronological. Output bars are
    /// ordered by bucket timestamp.
    #[must_use]
    pub fn sql(&self) -> String {
        let table = quote_ident(&self.table);
        let ts = quote_ident(&self.time_column);
        let width = self.timeframe.seconds();
        format!(
            "SELECT min({ts}) AS bucket_ts, \
             first(open) AS open, max(high) AS high, min(low) AS low, \
             last(close) AS close, sum(volume) AS volume, count(*) AS row_count \
             FROM (SELECT {ts}, open, high, low, close, volume FROM {table} ORDER BY {ts}) \
             GROUP BY CAST(strftime('%s', {ts}) AS INTEGER) / {width} \
             ORDER BY bucket_ts"
        )
    }
}

/// Quotes an SQL identifier, doubling any embedded quotes.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_contains_bucket_expression() {
        let sql = ResamplePlan::new(Timeframe::Hour2).sql();
        assert!(sql.contains("GROUP BY CAST(strftime('%s', \"dateX\") AS INTEGER) / 7200"));
    }

    #[test]
    fn sql_orders_the_source_subquery() {
        let sql = ResamplePlan::new(Timeframe::Minute5).sql();
        assert!(sql.contains("FROM (SELECT \"dateX\", open, high, low, close, volume FROM \"bars\" ORDER BY \"dateX\")"));
    }

    #[test]
    fn sql_respects_custom_names() {
        let sql = ResamplePlan::new(Timeframe::Day1)
            .with_table("candles")
            .with_time_column("ts")
            .sql();
        assert!(sql.contains("FROM \"candles\""));
        assert!(sql.contains("ORDER BY \"ts\""));
        assert!(sql.contains("/ 86400"));
    }

    #[test]
    fn quote_ident_doubles_embedded_quotes() {
        assert_eq!(quote_ident("plain"), "\"plain\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
