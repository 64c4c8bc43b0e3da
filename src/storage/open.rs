//! Opening the source and destination database files.
//!
//! The source is only ever read, so it is opened read-only. The destination
//! is opened read-write but never created: the tables being reloaded must
//! already exist, so a missing file is always an operator mistake.

use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Which side of the copy a database handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbRole {
    Source,
    Destination,
}

impl fmt::Display for DbRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Open the source database read-only.
pub fn open_source<P: AsRef<Path>>(path: P) -> rusqlite::Result<Connection> {
    open_with(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

/// Open the destination database for writing without creating it.
pub fn open_destination<P: AsRef<Path>>(path: P) -> rusqlite::Result<Connection> {
    open_with(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

fn open_with<P: AsRef<Path>>(path: P, flags: OpenFlags) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(path, flags)?;
    // SQLite opens lazily; touch the schema so a file that is not a
    // database fails here rather than on the first table.
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))?;
    Ok(conn)
}
