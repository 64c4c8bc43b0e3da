//! Configuration parsing for uconf-sync.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Interactive prompt for database paths left unset

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::observability::tracing::LogTarget;
use crate::report::OutputFormat;
use crate::storage::DbRole;
use crate::sync::{FailurePolicy, TableList};

/// Tables kept in sync between the two uconf databases by default.
pub const DEFAULT_TABLES: &[&str] = &[
    "alg_cfc_io",
    "alg_io",
    "algs",
    "algs_cfc",
    "matrix_alg",
    "matrix_alg_cfc",
    "matrix_signals",
];

/// Error type for configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No tables to synchronize")]
    EmptyTableList,

    #[error("Table name at position {0} is blank")]
    BlankTableName(usize),

    #[error("No {0} database path given")]
    MissingPath(DbRole),

    #[error("Failed to read database path: {0}")]
    Prompt(#[from] io::Error),
}

/// uconf-sync: copy tables from one SQLite configuration database into another.
#[derive(Parser, Debug, Clone)]
#[command(name = "uconf-sync")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Source database file (read-only). Prompted for on stdin if unset
    #[arg(short, long, env = "UCONF_SYNC_SOURCE")]
    pub source: Option<PathBuf>,

    /// Destination database file (rewritten in place). Prompted for on stdin if unset
    #[arg(short, long, env = "UCONF_SYNC_DEST")]
    pub dest: Option<PathBuf>,

    /// Comma-separated list of tables to copy, processed in order
    #[arg(
        short,
        long,
        env = "UCONF_SYNC_TABLES",
        value_delimiter = ',',
        default_values_t = default_tables()
    )]
    pub tables: Vec<String>,

    /// Continue with the remaining tables after one fails
    #[arg(long, env = "UCONF_SYNC_KEEP_GOING")]
    pub keep_going: bool,

    /// Report format (text, json)
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn default_tables() -> Vec<String> {
    DEFAULT_TABLES.iter().map(|t| (*t).to_owned()).collect()
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Check the table list before anything is opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tables.is_empty() {
            return Err(ConfigError::EmptyTableList);
        }
        if let Some(idx) = self.tables.iter().position(|t| t.trim().is_empty()) {
            return Err(ConfigError::BlankTableName(idx + 1));
        }
        Ok(())
    }

    pub fn policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        }
    }

    /// Status lines move to stderr when stdout carries a JSON report.
    pub fn log_target(&self) -> LogTarget {
        match self.output {
            OutputFormat::Text => LogTarget::Stdout,
            OutputFormat::Json => LogTarget::Stderr,
        }
    }

    pub fn table_list(&self) -> TableList {
        self.tables.iter().map(|t| t.trim()).collect()
    }

    /// Return the source and destination paths, reading any that were not
    /// configured from `input`, one line each, source first.
    ///
    /// A prompt naming the requested database is written to `prompt`.
    pub fn resolve_paths<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut prompt: W,
    ) -> Result<(PathBuf, PathBuf), ConfigError> {
        let source = match &self.source {
            Some(path) => path.clone(),
            None => read_path(&mut input, &mut prompt, DbRole::Source)?,
        };
        let dest = match &self.dest {
            Some(path) => path.clone(),
            None => read_path(&mut input, &mut prompt, DbRole::Destination)?,
        };
        Ok((source, dest))
    }

    /// Create a configuration for testing.
    #[cfg(test)]
    pub fn test_config(source: Option<PathBuf>, dest: Option<PathBuf>) -> Self {
        Self {
            source,
            dest,
            ..Self::default()
        }
    }
}

fn read_path<R: BufRead, W: Write>(
    input: &mut R,
    prompt: &mut W,
    role: DbRole,
) -> Result<PathBuf, ConfigError> {
    write!(prompt, "Path to the {role} database: ")?;
    prompt.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ConfigError::MissingPath(role));
    }

    let path = line.trim();
    if path.is_empty() {
        return Err(ConfigError::MissingPath(role));
    }
    Ok(PathBuf::from(path))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            dest: None,
            tables: default_tables(),
            keep_going: false,
            output: OutputFormat::Text,
            log_level: "info".into(),
        }
    }
}
