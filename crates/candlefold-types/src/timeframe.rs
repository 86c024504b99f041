//! Resampling timeframe definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Resampling bucket width.
///
/// The timeframe determines the width of the time windows that source rows
/// are grouped into: a row with timestamp `t` lands in bucket
/// `floor(unix_seconds(t) / seconds())`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// 1-minute bars.
    #[serde(rename = "m1")]
    Minute1,
    /// 5-minute bars.
    #[serde(rename = "m5")]
    Minute5,
    /// 15-minute bars.
    #[serde(rename = "m15")]
    Minute15,
    /// 30-minute bars.
    #[serde(rename = "m30")]
    Minute30,
    /// 1-hour bars.
    #[serde(rename = "h1")]
    Hour1,
    /// 2-hour bars.
    #[default]
    #[serde(rename = "h2")]
    Hour2,
    /// 4-hour bars.
    #[serde(rename = "h4")]
    Hour4,
    /// Daily bars.
    #[serde(rename = "d1")]
    Day1,
}

impl Timeframe {
    /// Returns the bucket width in seconds.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        match self {
            Self::Minute1 => 60,
            Self::Minute5 => 300,
            Self::Minute15 => 900,
            Self::Minute30 => 1800,
            Self::Hour1 => 3600,
            Self::Hour2 => 7200,
            Self::Hour4 => 14400,
            Self::Day1 => 86400,
        }
    }

    /// Returns the bucket index for a unix timestamp, in seconds.
    ///
    /// Buckets are aligned to the unix epoch. Truncating division matches
    /// the SQL bucketing expression.
    #[must_use]
    pub const fn bucket_index(&self, unix_seconds: i64) -> i64 {
        unix_seconds / self.seconds()
    }

    /// Returns the timeframe as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "m1",
            Self::Minute5 => "m5",
            Self::Minute15 => "m15",
            Self::Minute30 => "m30",
            Self::Hour1 => "h1",
            Self::Hour2 => "h2",
            Self::Hour4 => "h4",
            Self::Day1 => "d1",
        }
    }

    /// Returns all available timeframes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Minute1,
            Self::Minute5,
            Self::Minute15,
            Self::Minute30,
            Self::Hour1,
            Self::Hour2,
            Self::Hour4,
            Self::Day1,
        ]
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m1" | "1m" | "minute" | "minute1" => Ok(Self::Minute1),
            "m5" | "5m" | "minute5" => Ok(Self::Minute5),
            "m15" | "15m" | "minute15" => Ok(Self::Minute15),
            "m30" | "30m" | "minute30" => Ok(Self::Minute30),
            "h1" | "1h" | "hour" | "hour1" => Ok(Self::Hour1),
            "h2" | "2h" | "hour2" => Ok(Self::Hour2),
            "h4" | "4h" | "hour4" => Ok(Self::Hour4),
            "d1" | "1d" | "day" | "day1" | "daily" => Ok(Self::Day1),
            _ => Err(TimeframeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(String);

impl std::fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid timeframe '{}', expected one of: m1, m5, m15, m30, h1, h2, h4, d1",
            self.0
        )
    }
}

impl std::error::Error for TimeframeParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_seconds() {
        assert_eq!(Timeframe::Minute1.seconds(), 60);
        assert_eq!(Timeframe::Hour1.seconds(), 3600);
        assert_eq!(Timeframe::Hour2.seconds(), 7200);
        assert_eq!(Timeframe::Day1.seconds(), 86400);
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("m1".parse::<Timeframe>().unwrap(), Timeframe::Minute1);
        assert_eq!("2h".parse::<Timeframe>().unwrap(), Timeframe::Hour2);
        assert_eq!("H4".parse::<Timeframe>().unwrap(), Timeframe::Hour4);
        assert!("invalid".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_default_is_two_hours() {
        assert_eq!(Timeframe::default(), Timeframe::Hour2);
    }

    #[test]
    fn test_bucket_index() {
        // 2024-01-01T00:00:00Z is exactly on a 2-hour boundary.
        let midnight = 1_704_067_200;
        assert_eq!(
            Timeframe::Hour2.bucket_index(midnight),
            Timeframe::Hour2.bucket_index(midnight + 7199)
        );
        assert_eq!(
            Timeframe::Hour2.bucket_index(midnight + 7200),
            Timeframe::Hour2.bucket_index(midnight) + 1
        );
    }

    #[test]
    fn test_display_roundtrip() {
        for tf in Timeframe::all() {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), *tf);
        }
    }
}
