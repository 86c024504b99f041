//! Output selection and writing for the candlefold CLI.

use anyhow::Result;
use candlefold_lib::prelude::*;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Output format for resampled bars.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Write bars to a file or stdout in the selected format.
pub(crate) fn write_bars(bars: &[Bar], output: Option<&PathBuf>, format: Format) -> Result<()> {
    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            dispatch(bars, writer, format)
        }
        None => dispatch(bars, BufWriter::new(io::stdout()), format),
    }
}

fn dispatch<W: Write + Send>(bars: &[Bar], writer: W, format: Format) -> Result<()> {
    match format {
        Format::Csv => CsvFormatter::new().write_bars(bars, writer)?,
        Format::Json => JsonFormatter::new().write_bars(bars, writer)?,
        Format::Ndjson => JsonFormatter::ndjson().write_bars(bars, writer)?,
    }
    Ok(())
}
