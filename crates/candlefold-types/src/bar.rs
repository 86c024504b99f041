//! OHLCV (candlestick) bar data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One resampled OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar open time (timestamp of the first source row in the bucket).
    pub timestamp: DateTime<Utc>,
    /// Opening price (first source row's open, by arrival order).
    pub open: f64,
    /// Highest price during the bucket.
    pub high: f64,
    /// Lowest price during the bucket.
    pub low: f64,
    /// Closing price (last source row's close, by arrival order).
    pub close: f64,
    /// Total volume (sum over the bucket).
    pub volume: f64,
    /// Number of source rows in the bucket.
    pub row_count: u64,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        row_count: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            row_count,
        }
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) bar.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_bar() -> Bar {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        Bar::new(timestamp, 100.0, 106.5, 99.5, 103.0, 1000.0, 120)
    }

    #[test]
    fn test_range() {
        let bar = create_test_bar();
        assert!((bar.range() - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_body() {
        let bar = create_test_bar();
        assert!((bar.body() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_bullish() {
        let bar = create_test_bar();
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
    }

    #[test]
    fn test_bearish() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let bar = Bar::new(timestamp, 103.0, 106.5, 99.5, 100.0, 1000.0, 120);
        assert!(!bar.is_bullish());
        assert!(bar.is_bearish());
    }
}
