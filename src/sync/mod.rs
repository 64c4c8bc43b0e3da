//! Table synchronization between a source and a destination database.
//!
//! The [`Synchronizer`] owns one handle to each database file. For every
//! requested table it reads all source rows, deletes the destination rows and
//! inserts the source rows, committing once per table. Empty source tables
//! are skipped so the destination keeps whatever it had.
//!
//! Connection and close failures are reported and never abort anything on
//! their own. A table failure is rolled back and, under the default
//! [`FailurePolicy::FailFast`], stops the run before the remaining tables.

mod outcome;
mod table_list;

pub use outcome::{SyncReport, TableOutcome, TableStatus};
pub use table_list::TableList;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::storage::{open_destination, open_source, read_rows, replace_rows, DbRole};

/// Error opening one of the two databases.
#[derive(Debug, Error)]
#[error("Failed to open {role} database {}: {source}", path.display())]
pub struct ConnectError {
    pub role: DbRole,
    pub path: PathBuf,
    #[source]
    pub source: rusqlite::Error,
}

/// Error synchronizing a table.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Cannot update table {table}: no {role} connection")]
    NotConnected { table: String, role: DbRole },

    #[error("Failed to update table {table}: {source}")]
    Table {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl SyncError {
    /// Name of the table that failed.
    pub fn table(&self) -> &str {
        match self {
            Self::NotConnected { table, .. } | Self::Table { table, .. } => table,
        }
    }
}

/// What to do with the remaining tables after one fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failed table and return its error.
    #[default]
    FailFast,
    /// Record the failure in the report and continue with the next table.
    KeepGoing,
}

/// Result of closing one database handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// There was no handle to close.
    NotConnected,
    /// Closing failed; the handle is still held.
    Failed,
}

/// Per-handle results of [`Synchronizer::disconnect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected {
    pub source: CloseOutcome,
    pub destination: CloseOutcome,
}

/// Copies whole tables from a source database into a destination database.
#[derive(Debug)]
pub struct Synchronizer {
    source_path: PathBuf,
    dest_path: PathBuf,
    source: Option<Connection>,
    dest: Option<Connection>,
    policy: FailurePolicy,
}

impl Synchronizer {
    /// Create a synchronizer for the given files. Nothing is opened until
    /// [`connect`](Self::connect).
    pub fn new(source_path: impl Into<PathBuf>, dest_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            dest_path: dest_path.into(),
            source: None,
            dest: None,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn dest_path(&self) -> &Path {
        &self.dest_path
    }

    /// True when both handles are open.
    pub fn is_connected(&self) -> bool {
        self.source.is_some() && self.dest.is_some()
    }

    /// Point the synchronizer at new files and connect to them.
    ///
    /// Handles to the previous files are closed first, so a failure leaves
    /// nothing pointing at the old databases.
    pub fn connect_to(
        &mut self,
        source_path: impl Into<PathBuf>,
        dest_path: impl Into<PathBuf>,
    ) -> Result<(), ConnectError> {
        self.release_handles();
        self.source_path = source_path.into();
        self.dest_path = dest_path.into();
        self.connect()
    }

    /// Open both databases, source first.
    ///
    /// Any handles already held are closed before opening. If the
    /// destination fails to open the source handle stays open;
    /// [`disconnect`](Self::disconnect) releases whatever was opened.
    pub fn connect(&mut self) -> Result<(), ConnectError> {
        self.release_handles();
        self.source = Some(open_handle(DbRole::Source, &self.source_path)?);
        self.dest = Some(open_handle(DbRole::Destination, &self.dest_path)?);
        info!(
            source = %self.source_path.display(),
            destination = %self.dest_path.display(),
            "Database connections established"
        );
        Ok(())
    }

    /// Close both handles. Never fails; safe to call at any time.
    ///
    /// Returns what happened to each handle.
    pub fn disconnect(&mut self) -> Disconnected {
        Disconnected {
            source: close_handle(&mut self.source, DbRole::Source, &self.source_path),
            destination: close_handle(&mut self.dest, DbRole::Destination, &self.dest_path),
        }
    }

    /// Close whatever is open and drop it, even if closing failed.
    fn release_handles(&mut self) {
        if self.source.is_some() || self.dest.is_some() {
            self.disconnect();
        }
        self.source = None;
        self.dest = None;
    }

    /// Copy every table in `tables`, in order.
    ///
    /// Under [`FailurePolicy::FailFast`] the first failure is returned and
    /// later tables are not touched. Under [`FailurePolicy::KeepGoing`]
    /// failures are recorded in the report instead.
    pub fn sync_tables(&mut self, tables: impl Into<TableList>) -> Result<SyncReport, SyncError> {
        let tables = tables.into();
        let mut report = SyncReport::default();

        for (idx, table) in tables.iter().enumerate() {
            match self.sync_table(table) {
                Ok(status) => report.push(table, status),
                Err(err) if self.policy == FailurePolicy::KeepGoing => {
                    report.push(
                        table,
                        TableStatus::Failed {
                            error: err.to_string(),
                        },
                    );
                }
                Err(err) => {
                    let remaining = tables.len() - idx - 1;
                    if remaining > 0 {
                        warn!(table, remaining, "Aborting remaining tables");
                    }
                    return Err(err);
                }
            }
        }

        Ok(report)
    }

    /// Copy a single table. Failures are rolled back and returned.
    pub fn sync_table(&mut self, table: &str) -> Result<TableStatus, SyncError> {
        let source = self.source.as_ref().ok_or_else(|| not_connected(table, DbRole::Source))?;
        let dest = self
            .dest
            .as_mut()
            .ok_or_else(|| not_connected(table, DbRole::Destination))?;

        copy_table(source, dest, table).map_err(|err| {
            error!(table, error = %err, "Failed to update table, changes rolled back");
            SyncError::Table {
                table: table.to_owned(),
                source: err,
            }
        })
    }
}

fn copy_table(source: &Connection, dest: &mut Connection, table: &str) -> rusqlite::Result<TableStatus> {
    let rows = read_rows(source, table)?;
    if rows.is_empty() {
        info!(table, "Source table is empty, skipping");
        return Ok(TableStatus::Skipped);
    }

    let rows = replace_rows(dest, table, &rows)?;
    info!(table, rows, "Table updated");
    Ok(TableStatus::Copied { rows })
}

fn not_connected(table: &str, role: DbRole) -> SyncError {
    error!(table, %role, "Failed to update table, database not connected");
    SyncError::NotConnected {
        table: table.to_owned(),
        role,
    }
}

fn open_handle(role: DbRole, path: &Path) -> Result<Connection, ConnectError> {
    let opened = match role {
        DbRole::Source => open_source(path),
        DbRole::Destination => open_destination(path),
    };
    opened.map_err(|source| {
        error!(%role, path = %path.display(), error = %source, "Failed to connect to database");
        ConnectError {
            role,
            path: path.to_path_buf(),
            source,
        }
    })
}

fn close_handle(slot: &mut Option<Connection>, role: DbRole, path: &Path) -> CloseOutcome {
    let Some(conn) = slot.take() else {
        info!(%role, path = %path.display(), "No connection to close");
        return CloseOutcome::NotConnected;
    };

    match conn.close() {
        Ok(()) => {
            info!(%role, path = %path.display(), "Database connection closed");
            CloseOutcome::Closed
        }
        Err((conn, err)) => {
            warn!(%role, path = %path.display(), error = %err, "Failed to close database connection");
            *slot = Some(conn);
            CloseOutcome::Failed
        }
    }
}
