//! uconf-sync: copy a fixed set of tables between two SQLite databases.
//!
//! Each named table in the destination database is truncated and reloaded
//! with the rows of the same table in the source database. Every table is
//! committed in its own transaction and rolled back if anything fails.
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration, interactive path prompt
//! - [`observability`]: Tracing setup
//! - [`report`]: End-of-run summary rendering
//! - [`storage`]: SQLite values, open modes and table copy primitives
//! - [`sync`]: The [`Synchronizer`](sync::Synchronizer)

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions, // sync::SyncError is fine
    clippy::must_use_candidate,      // Not all functions need #[must_use]
    clippy::missing_errors_doc,      // Error docs can be verbose
    clippy::missing_panics_doc       // Panic docs can be verbose
)]

pub mod config;
pub mod observability;
pub mod report;
pub mod storage;
pub mod sync;

pub use storage::{DbRole, DbValue, Row};
pub use sync::{
    CloseOutcome, Disconnected, FailurePolicy, SyncError, SyncReport, Synchronizer, TableList,
    TableStatus,
};
