//! Answer scoring for sampled LLM generations
//!
//! This crate scores result files produced by a benchmark runner. Each file is
//! a JSON array of records holding one or more sampled answers, a gold label
//! and the generation latency.
//!
//! # Features
//!
//! - Multiple-choice (A-D / 0-3), yes/no and free-form gold labels
//! - Majority-vote consensus over repeated samples with stable tie-breaking
//! - Last-mention extraction for multi-step answers
//! - Prefix-match fallback when no structured value can be extracted
//! - Parallel multi-file aggregation into a CSV or JSON summary table
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use answer_eval::{
//!     config::SummaryFormat,
//!     reporting::print_console_report,
//!     runner::{Aggregator, AggregatorConfig},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let files = vec![
//!         PathBuf::from("results/mmlu__cod.json"),
//!         PathBuf::from("results/mmlu__cot.json"),
//!     ];
//!
//!     let aggregator = Aggregator::new(AggregatorConfig::default());
//!     let table = aggregator.run(&files).await?;
//!
//!     print_console_report(&table);
//!     table.write("results/summary.csv", SummaryFormat::Csv)?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod records;
pub mod reporting;
pub mod runner;

pub use config::{Config, SummaryFormat};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::analysis::{
        majority_vote, normalize, resolve_consensus, score_file, score_records, Domain,
        GoldClass, RecordVerdict, ScoreResult,
    };
    pub use crate::config::{Config, SummaryFormat};
    pub use crate::records::{load_records_from_file, Gold, LoadError, Record};
    pub use crate::reporting::{print_console_report, CsvWriter, JsonSummary, SummaryTable};
    pub use crate::runner::{AggregateError, Aggregator, AggregatorConfig};
}
