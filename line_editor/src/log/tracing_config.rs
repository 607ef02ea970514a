// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;

use tracing_core::LevelFilter;

/// Where log output goes. The editor owns the terminal while it runs, so hosts that
/// render to stdout should log to a file only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    /// Path of the log file.
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

/// Fields:
/// - `writer_config`: [`WriterConfig`] - Zero or more writers to use for tracing.
/// - `level_filter`: [`LevelFilter`] - The log level to use for tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

impl TracingConfig {
    /// Log to the given file at `DEBUG` and above.
    #[must_use]
    pub fn new_file(path: impl Into<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(path.into()),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }
}

/// Handle converting parsed command line arguments (via `clap` crate) into a
/// [`WriterConfig`].
impl FromStr for DisplayPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(DisplayPreference::Stdout),
            "stderr" => Ok(DisplayPreference::Stderr),
            _ => Err(format!("{s} is not a valid display for tracing output")),
        }
    }
}
