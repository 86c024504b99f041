//! CSV output format.

use candlefold_types::Bar;
use std::io::Write;

use crate::{FormatError, Formatter};

const COLUMNS: [&str; 7] = [
    "timestamp",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "row_count",
];

/// CSV formatter.
///
/// Every field is double-quoted. The header precedes the first data row and
/// is tracked per invocation, so an empty result set writes nothing.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include a header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    fn write_line<W: Write>(&self, writer: &mut W, fields: &[String]) -> Result<(), FormatError> {
        let line = fields
            .iter()
            .map(|f| quoted(f))
            .collect::<Vec<_>>()
            .join(&self.delimiter.to_string());
        writeln!(writer, "{line}")?;
        Ok(())
    }
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(
        &self,
        bars: &[Bar],
        mut writer: W,
    ) -> Result<(), FormatError> {
        // Header state is local to this invocation, never process-wide.
        let mut wrote_header = false;

        for bar in bars {
            if self.include_header && !wrote_header {
                let header: Vec<String> = COLUMNS.iter().map(|c| (*c).to_string()).collect();
                self.write_line(&mut writer, &header)?;
                wrote_header = true;
            }
            let fields = vec![
                bar.timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
                bar.row_count.to_string(),
            ];
            self.write_line(&mut writer, &fields)?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

/// Double-quotes a field, doubling any embedded quotes.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    fn create_test_bar() -> Bar {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        Bar::new(timestamp, 100.0, 106.5, 99.5, 103.0, 1000.0, 120)
    }

    #[test]
    fn test_csv_bars() {
        let formatter = CsvFormatter::new();
        let bars = vec![create_test_bar()];
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&bars, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let mut lines = result.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"timestamp\",\"open\",\"high\",\"low\",\"close\",\"volume\",\"row_count\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"2024-01-15T12:00:00Z\",\"100\",\"106.5\",\"99.5\",\"103\",\"1000\",\"120\""
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_no_header() {
        let formatter = CsvFormatter::new().with_header(false);
        let bars = vec![create_test_bar()];
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&bars, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("timestamp"));
        assert_eq!(result.lines().count(), 1);
    }

    #[test]
    fn test_empty_result_writes_nothing() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&[], &mut output).unwrap();

        assert!(output.into_inner().is_empty());
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let bars = vec![create_test_bar()];
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&bars, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("\"timestamp\"\t\"open\""));
    }

    #[test]
    fn test_quoting_doubles_embedded_quotes() {
        assert_eq!(quoted("plain"), "\"plain\"");
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }
}
