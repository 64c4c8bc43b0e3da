//! SQLite storage layer for uconf-sync.
//!
//! Provides:
//! - Engine-agnostic column values ([`DbValue`])
//! - Open modes for the source and destination files
//! - Full-table read and truncate-and-reload primitives

pub mod open;
pub mod table;
pub mod value;

pub use open::{open_destination, open_source, DbRole};
pub use table::{quote_identifier, read_rows, replace_rows};
pub use value::{DbValue, Row};
