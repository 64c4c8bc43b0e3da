//! Rendering of the end-of-run summary.

use crate::sync::{SyncReport, TableStatus};

/// Output format for the summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

/// Render `report` in the requested format.
pub fn render(report: &SyncReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report),
    }
}

fn render_text(report: &SyncReport) -> String {
    if report.outcomes().is_empty() {
        return "No tables processed.".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("{:<30} {:>10} {:>10}\n", "TABLE", "STATUS", "ROWS"));
    out.push_str(&format!("{}\n", "-".repeat(52)));
    for outcome in report.outcomes() {
        let rows = match &outcome.status {
            TableStatus::Copied { rows } => rows.to_string(),
            _ => "-".to_string(),
        };
        out.push_str(&format!(
            "{:<30} {:>10} {:>10}\n",
            outcome.table,
            outcome.status.label(),
            rows
        ));
    }
    for outcome in report.failed() {
        if let TableStatus::Failed { error } = &outcome.status {
            out.push_str(&format!("\n{}: {}", outcome.table, error));
        }
    }
    out.push_str(&format!(
        "\nTotal: {} table(s), {} row(s) copied",
        report.outcomes().len(),
        report.rows_copied()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::Synchronizer;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_empty_report() {
        let text = render(&SyncReport::default(), OutputFormat::Text).unwrap();
        assert_eq!(text, "No tables processed.");

        let json = render(&SyncReport::default(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({"tables": []}));
    }

    #[test]
    fn test_failed_tables_are_listed() {
        let mut sync = Synchronizer::new("a.db", "b.db")
            .with_policy(crate::sync::FailurePolicy::KeepGoing);
        let report = sync.sync_tables("algs").unwrap();

        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("failed"));
        assert!(text.contains("algs: Cannot update table algs"));
        assert!(text.ends_with("Total: 1 table(s), 0 row(s) copied"));
    }
}
