//! Summary table, artifact writers and console rendering

pub mod csv_writer;

pub use csv_writer::CsvWriter;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{RecordVerdict, ScoreResult};
use crate::config::SummaryFormat;

/// Reporting errors
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row per scored file, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryTable {
    rows: Vec<ScoreResult>,
}

impl SummaryTable {
    pub fn new(rows: Vec<ScoreResult>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ScoreResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table in the given format, creating parent directories
    pub fn write(&self, path: impl AsRef<Path>, format: SummaryFormat) -> Result<(), ReportError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        match format {
            SummaryFormat::Csv => CsvWriter::write_summary(path, self)?,
            SummaryFormat::Json => JsonSummary::from_table(self).write_to_file(path)?,
        }

        tracing::info!("Wrote {} summary rows to {}", self.len(), path.display());
        Ok(())
    }
}

impl FromIterator<ScoreResult> for SummaryTable {
    fn from_iter<I: IntoIterator<Item = ScoreResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// JSON summary export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub timestamp: String,
    pub total_files: usize,
    pub total_records: usize,
    pub rows: Vec<ScoreResult>,
}

impl JsonSummary {
    /// Create from a summary table
    pub fn from_table(table: &SummaryTable) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            total_files: table.len(),
            total_records: table.rows().iter().map(|r| r.n).sum(),
            rows: table.rows().to_vec(),
        }
    }

    /// Write to JSON file
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Print the summary table with aligned columns
pub fn print_console_report(table: &SummaryTable) {
    let width = table
        .rows()
        .iter()
        .map(|r| r.task.len())
        .max()
        .unwrap_or(0)
        .max("task".len());

    println!(
        "{:<width$}  {:>8}  {:>11}  {:>6}",
        "task",
        "accuracy",
        "latency_avg",
        "n",
        width = width
    );
    println!("{:-<1$}", "", width + 33);

    for row in table.rows() {
        println!(
            "{:<width$}  {:>8.3}  {:>11.3}  {:>6}",
            row.task,
            row.accuracy,
            row.latency_avg,
            row.n,
            width = width
        );
    }
}

/// Print per-record verdicts for one file
pub fn print_verdicts(task: &str, verdicts: &[RecordVerdict], only_incorrect: bool) {
    let correct = verdicts.iter().filter(|v| v.correct).count();
    println!("=== {} ===", task);
    println!("Records: {}, correct: {}\n", verdicts.len(), correct);

    for verdict in verdicts.iter().filter(|v| !only_incorrect || !v.correct) {
        let status = if verdict.correct { "OK" } else { "MISS" };
        let id = verdict
            .id
            .as_deref()
            .map(|id| format!(" id={}", id))
            .unwrap_or_default();
        let rule = if verdict.used_fallback {
            "prefix".to_string()
        } else {
            format!(
                "{} vs {}",
                format_value(verdict.predicted_value),
                format_value(verdict.gold_value)
            )
        };

        println!(
            "  [{:>4}] #{}{} {} ({}): prediction={:?} gold={:?}",
            status, verdict.index, id, verdict.domain, rule, verdict.prediction, verdict.gold
        );
    }
}

fn format_value(value: Option<u8>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_table() -> SummaryTable {
        vec![
            ScoreResult {
                task: "mmlu__cod".to_string(),
                accuracy: 0.75,
                latency_avg: 1.5,
                n: 4,
            },
            ScoreResult::empty("gsm8k__cot"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_json_summary_totals() {
        let summary = JsonSummary::from_table(&sample_table());
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.rows[0].task, "mmlu__cod");
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/summary.json");

        sample_table().write(&path, SummaryFormat::Json).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["total_files"], 2);
        assert_eq!(written["rows"][1]["task"], "gsm8k__cot");
        assert_eq!(written["rows"][1]["n"], 0);
    }

    #[test]
    fn test_table_serializes_as_row_array() {
        let value = serde_json::to_value(sample_table()).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["accuracy"], 0.75);
    }
}
