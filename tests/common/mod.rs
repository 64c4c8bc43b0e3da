//! Test utilities for uconf-sync tests.
//!
//! Provides:
//! - A pair of temporary source/destination database files
//! - Helpers to seed and inspect tables

#![allow(dead_code)]

use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;
use uconf_sync::storage::read_rows;
use uconf_sync::{DbValue, Row};

/// Test fixture that manages two database files in a temporary directory.
///
/// The directory is automatically cleaned up when the fixture is dropped.
pub struct TestFixture {
    /// Temporary directory holding both databases
    pub temp_dir: TempDir,
    /// Path to the source database file
    pub source_path: PathBuf,
    /// Path to the destination database file
    pub dest_path: PathBuf,
}

impl TestFixture {
    /// Create both database files, each initialised with `schema`.
    pub fn new(schema: &str) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let source_path = temp_dir.path().join("uconf1.db");
        let dest_path = temp_dir.path().join("uconf2.db");

        for path in [&source_path, &dest_path] {
            Connection::open(path)
                .expect("failed to create database")
                .execute_batch(schema)
                .expect("failed to apply schema");
        }

        Self {
            temp_dir,
            source_path,
            dest_path,
        }
    }

    pub fn source(&self) -> Connection {
        Connection::open(&self.source_path).expect("failed to open source")
    }

    pub fn dest(&self) -> Connection {
        Connection::open(&self.dest_path).expect("failed to open destination")
    }

    /// Rows of `table` in the source database, sorted.
    pub fn source_rows(&self, table: &str) -> Vec<Row> {
        sorted_rows(&self.source(), table)
    }

    /// Rows of `table` in the destination database, sorted.
    pub fn dest_rows(&self, table: &str) -> Vec<Row> {
        sorted_rows(&self.dest(), table)
    }
}

/// Read all rows and sort them so comparisons ignore storage order.
pub fn sorted_rows(conn: &Connection, table: &str) -> Vec<Row> {
    let mut rows = read_rows(conn, table).expect("failed to read rows");
    rows.sort_by_key(|row| format!("{row:?}"));
    rows
}

/// Build a row of integer and text values, e.g. `row(1, "a")`.
pub fn row(id: i64, name: &str) -> Row {
    vec![DbValue::Integer(id), DbValue::Text(name.to_owned())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_both_databases() {
        let fixture = TestFixture::new("CREATE TABLE algs (id INTEGER, name TEXT);");
        assert!(fixture.source_path.exists());
        assert!(fixture.dest_path.exists());
        assert!(fixture.dest_rows("algs").is_empty());
    }
}
