//! CSV output for the summary table

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use super::{ReportError, SummaryTable};

/// Column order of the summary artifact
pub const SUMMARY_COLUMNS: [&str; 4] = ["task", "accuracy", "latency_avg", "n"];

/// Write summary tables as CSV
pub struct CsvWriter;

impl CsvWriter {
    /// Write the table to a CSV file
    pub fn write_summary(path: impl AsRef<Path>, table: &SummaryTable) -> Result<(), ReportError> {
        let file = std::fs::File::create(path)?;
        Self::write_to(file, table)
    }

    /// Write the table as CSV to any writer.
    ///
    /// The header row is always written, even for an empty table.
    pub fn write_to<W: Write>(writer: W, table: &SummaryTable) -> Result<(), ReportError> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
        writer.write_record(SUMMARY_COLUMNS)?;
        for row in table.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
