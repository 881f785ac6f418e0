//! Per-entry outcome rows and the CSV report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// Report columns, in file order.
pub const REPORT_COLUMNS: [&str; 5] = ["entry", "action", "timestamp", "error", "dry_run"];

/// Outcome of processing one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Created,
    Updated,
    Failed,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Created => "created",
            Action::Updated => "updated",
            Action::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One line of the report. Field order matches [`REPORT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Match value of the entry.
    pub entry: String,
    pub action: Action,
    pub timestamp: DateTime<Utc>,
    /// Error message, empty on success.
    pub error: String,
    pub dry_run: bool,
}

impl ReportRow {
    pub fn success(entry: impl Into<String>, action: Action, dry_run: bool) -> Self {
        Self {
            entry: entry.into(),
            action,
            timestamp: Utc::now(),
            error: String::new(),
            dry_run,
        }
    }

    pub fn failure(entry: impl Into<String>, error: impl Into<String>, dry_run: bool) -> Self {
        Self {
            entry: entry.into(),
            action: Action::Failed,
            timestamp: Utc::now(),
            error: error.into(),
            dry_run,
        }
    }
}

/// In-memory report, written once after all entries are processed.
#[derive(Debug, Clone, Default)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows with the given action.
    pub fn count(&self, action: Action) -> usize {
        self.rows.iter().filter(|r| r.action == action).count()
    }

    /// Write the report as CSV, replacing any existing file.
    ///
    /// The header is written even when there are no rows.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;

        writer.write_record(REPORT_COLUMNS)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!("Migration report saved to {} ({} rows)", path.display(), self.rows.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_back(path: &Path) -> (csv::StringRecord, Vec<ReportRow>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().clone();
        let rows = reader.deserialize().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn test_write_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("migration_report.csv");

        let mut report = Report::new();
        report.push(ReportRow::success("A", Action::Created, false));
        report.push(ReportRow::failure("B, with comma", "HTTP 500: \"boom\"", false));
        report.write_csv(&path).unwrap();

        let (headers, rows) = read_back(&path);
        assert_eq!(headers, csv::StringRecord::from(REPORT_COLUMNS.to_vec()));
        assert_eq!(rows, report.rows());
    }

    #[test]
    fn test_header_written_for_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        Report::new().write_csv(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "entry,action,timestamp,error,dry_run\n");
    }

    #[test]
    fn test_cells_are_lowercase() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        let mut report = Report::new();
        report.push(ReportRow::success("A", Action::Updated, true));
        report.write_csv(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let line = content.lines().nth(1).unwrap();
        assert!(line.starts_with("A,updated,"));
        assert!(line.ends_with(",,true"));
    }

    #[test]
    fn test_counts() {
        let mut report = Report::new();
        report.push(ReportRow::success("A", Action::Created, false));
        report.push(ReportRow::success("B", Action::Updated, false));
        report.push(ReportRow::failure("C", "nope", false));
        report.push(ReportRow::success("D", Action::Created, false));

        assert_eq!(report.len(), 4);
        assert_eq!(report.count(Action::Created), 2);
        assert_eq!(report.count(Action::Updated), 1);
        assert_eq!(report.count(Action::Failed), 1);
    }
}
