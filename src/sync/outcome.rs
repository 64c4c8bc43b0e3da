//! Per-table results of a synchronization run.

use serde::Serialize;

/// What happened to a single table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableStatus {
    /// Destination was reloaded with `rows` rows.
    Copied { rows: usize },
    /// Source table was empty; destination left untouched.
    Skipped,
    /// Table failed and was rolled back. Only recorded when the run keeps
    /// going past failures.
    Failed { error: String },
}

impl TableStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Copied { .. } => "copied",
            Self::Skipped => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOutcome {
    pub table: String,
    #[serde(flatten)]
    pub status: TableStatus,
}

/// Outcomes of every table processed, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    tables: Vec<TableOutcome>,
}

impl SyncReport {
    pub(crate) fn push(&mut self, table: &str, status: TableStatus) {
        self.tables.push(TableOutcome {
            table: table.to_owned(),
            status,
        });
    }

    pub fn outcomes(&self) -> &[TableOutcome] {
        &self.tables
    }

    /// Status of `table`, if it was processed.
    pub fn status(&self, table: &str) -> Option<&TableStatus> {
        self.tables
            .iter()
            .find(|outcome| outcome.table == table)
            .map(|outcome| &outcome.status)
    }

    /// Total rows written across all copied tables.
    pub fn rows_copied(&self) -> usize {
        self.tables
            .iter()
            .map(|outcome| match outcome.status {
                TableStatus::Copied { rows } => rows,
                _ => 0,
            })
            .sum()
    }

    pub fn failed(&self) -> impl Iterator<Item = &TableOutcome> {
        self.tables
            .iter()
            .filter(|outcome| matches!(outcome.status, TableStatus::Failed { .. }))
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_totals() {
        let mut report = SyncReport::default();
        report.push("algs", TableStatus::Copied { rows: 2 });
        report.push("matrix_alg", TableStatus::Skipped);
        report.push("alg_io", TableStatus::Copied { rows: 5 });

        assert_eq!(report.rows_copied(), 7);
        assert!(report.is_success());
        assert_eq!(report.status("matrix_alg"), Some(&TableStatus::Skipped));
        assert_eq!(report.status("matrix_signals"), None);
    }

    #[test]
    fn test_report_failures() {
        let mut report = SyncReport::default();
        report.push("algs", TableStatus::Copied { rows: 2 });
        report.push(
            "alg_io",
            TableStatus::Failed {
                error: "no such table: alg_io".into(),
            },
        );

        assert!(!report.is_success());
        let failed: Vec<_> = report.failed().map(|o| o.table.as_str()).collect();
        assert_eq!(failed, vec!["alg_io"]);
    }

    #[test]
    fn test_status_serialization() {
        let outcome = TableOutcome {
            table: "algs".into(),
            status: TableStatus::Copied { rows: 2 },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"table": "algs", "status": "copied", "rows": 2})
        );
    }
}
