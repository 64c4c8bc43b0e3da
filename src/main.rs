//! uconf-sync: copy a set of tables from one SQLite database into another.
//!
//! # Usage
//!
//! ```bash
//! uconf-sync --source uconf1.db --dest uconf2.db --tables algs,matrix_alg
//! ```
//!
//! Environment variables can also be used:
//! - `UCONF_SYNC_SOURCE`: Source database file
//! - `UCONF_SYNC_DEST`: Destination database file
//! - `UCONF_SYNC_TABLES`: Comma-separated table list
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)
//!
//! Paths that are not given are read from stdin, one per line. With
//! `--output json` status lines go to stderr so stdout holds only the report.

use anyhow::{bail, Context, Result};
use std::io;
use uconf_sync::config::Config;
use uconf_sync::observability::tracing::init_tracing;
use uconf_sync::report::render;
use uconf_sync::Synchronizer;

fn main() -> Result<()> {
    // Parse configuration from CLI arguments and environment
    let config = Config::parse_args();

    // Initialize tracing/logging
    init_tracing(&config.log_level, config.log_target());

    config.validate()?;
    let (source, dest) = config.resolve_paths(io::stdin().lock(), io::stderr())?;

    let mut synchronizer = Synchronizer::new(source, dest).with_policy(config.policy());

    if let Err(err) = synchronizer.connect() {
        synchronizer.disconnect();
        return Err(err).context("could not connect to databases");
    }

    let result = synchronizer.sync_tables(config.table_list());
    synchronizer.disconnect();
    let report = result.context("table synchronization aborted")?;

    println!("{}", render(&report, config.output)?);

    let failed = report.failed().count();
    if failed > 0 {
        bail!("{failed} table(s) failed to synchronize");
    }
    Ok(())
}
