//! JSON output format.

use candlefold_types::Bar;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(
        &self,
        bars: &[Bar],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, bars)?;
                } else {
                    serde_json::to_writer(&mut writer, bars)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for bar in bars {
                    serde_json::to_writer(&mut writer, bar)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    fn create_test_bars() -> Vec<Bar> {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap();
        vec![
            Bar::new(t0, 100.0, 106.5, 99.5, 103.0, 1000.0, 120),
            Bar::new(t1, 103.0, 104.0, 101.0, 102.0, 800.0, 120),
        ]
    }

    #[test]
    fn test_json_array() {
        let formatter = JsonFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with('['));
        assert!(result.contains("\"open\":100.0"));
        assert!(result.contains("2024-01-15T12:00:00Z"));
    }

    #[test]
    fn test_ndjson_one_line_per_bar() {
        let formatter = JsonFormatter::ndjson();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(result.lines().count(), 2);
        assert!(result.lines().all(|l| l.starts_with('{')));
    }

    #[test]
    fn test_extension() {
        assert_eq!(JsonFormatter::new().extension(), "json");
        assert_eq!(JsonFormatter::ndjson().extension(), "ndjson");
    }
}
