//! Run configuration
//!
//! Everything the pipeline needs is passed in here; nothing is read from
//! globals or hardcoded paths.

use std::path::PathBuf;

/// Legacy output file name.
pub const DEFAULT_OUTPUT_FILE: &str = "data.csv";

/// Order in which directory entries are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum EntryOrder {
    /// Sort by file name (reproducible across platforms)
    #[default]
    Sorted,
    /// Whatever order the filesystem listing yields
    Listing,
}

/// What to do with a shot event missing `location` or `shot.outcome.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MissingFieldPolicy {
    /// Fail the whole run
    #[default]
    Abort,
    /// Drop the shot, log a warning and keep going
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn delimiter(&self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            OutputFormat::Tsv => b'\t',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn terminator(&self) -> csv::Terminator {
        match self {
            LineEnding::Lf => csv::Terminator::Any(b'\n'),
            LineEnding::Crlf => csv::Terminator::CRLF,
        }
    }
}

/// Delimited output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    pub format: OutputFormat,
    pub line_ending: LineEnding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub events_dir: PathBuf,
    pub output: PathBuf,
    pub order: EntryOrder,
    pub on_missing: MissingFieldPolicy,
    pub write: WriteOptions,
}

impl ExtractConfig {
    /// Config with defaults for everything except the events directory.
    pub fn new(events_dir: impl Into<PathBuf>) -> Self {
        Self {
            events_dir: events_dir.into(),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            order: EntryOrder::default(),
            on_missing: MissingFieldPolicy::default(),
            write: WriteOptions::default(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}
