//! Per-file scoring of generation records

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::consensus::resolve_consensus;
use super::domain::{Domain, GoldClass};
use super::normalize::normalize;
use crate::records::{load_records_from_file, LoadError, Record};

/// Accuracy and latency for one result file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub task: String,
    pub accuracy: f64,
    pub latency_avg: f64,
    pub n: usize,
}

impl ScoreResult {
    /// Result for a file with no records
    pub fn empty(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            accuracy: 0.0,
            latency_avg: 0.0,
            n: 0,
        }
    }
}

/// How a single record was judged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordVerdict {
    pub index: usize,
    pub id: Option<String>,
    pub domain: Domain,
    /// Consensus prediction the record was judged on
    pub prediction: String,
    pub gold: String,
    pub gold_value: Option<u8>,
    pub predicted_value: Option<u8>,
    /// True when the prefix fallback decided correctness
    pub used_fallback: bool,
    pub correct: bool,
}

/// Prefix fallback for answers without a structured value on both sides.
///
/// Correct only when the normalized prediction starts with the normalized
/// gold. A prediction that mentions the gold later on ("The city is Paris")
/// is judged incorrect; this is the established scoring behavior.
pub fn fallback_match(prediction: &str, gold: &str) -> bool {
    normalize(prediction).starts_with(&normalize(gold))
}

/// Judge one record: consensus, domain classification, extraction, then
/// equality or prefix fallback.
pub fn judge_record(index: usize, record: &Record) -> RecordVerdict {
    let prediction = resolve_consensus(&record.answers).unwrap_or_default();
    let gold_text = record.gold.as_text();

    let class = GoldClass::classify(&record.gold);
    let gold_value = class.gold_value();
    let predicted_value = class.domain().extract(&prediction);

    let (correct, used_fallback) = match (predicted_value, gold_value) {
        (Some(predicted), Some(gold)) => (predicted == gold, false),
        _ => (fallback_match(&prediction, &gold_text), true),
    };

    RecordVerdict {
        index,
        id: record.display_id(),
        domain: class.domain(),
        prediction: prediction.into_owned(),
        gold: gold_text.into_owned(),
        gold_value,
        predicted_value,
        used_fallback,
        correct,
    }
}

/// Judge every record in order
pub fn judge_records(records: &[Record]) -> Vec<RecordVerdict> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| judge_record(index, record))
        .collect()
}

/// Score in-memory records under the given task label
pub fn score_records(task: impl Into<String>, records: &[Record]) -> ScoreResult {
    let task = task.into();
    if records.is_empty() {
        tracing::warn!("No records to score for task {}", task);
        return ScoreResult::empty(task);
    }

    let mut correct = 0usize;
    let mut latency_sum = 0.0;

    for (index, record) in records.iter().enumerate() {
        let verdict = judge_record(index, record);
        tracing::debug!(
            "{} #{}: {} gold={:?} prediction={:?} fallback={} correct={}",
            task,
            index,
            verdict.domain,
            verdict.gold,
            verdict.prediction,
            verdict.used_fallback,
            verdict.correct
        );

        if verdict.correct {
            correct += 1;
        }
        latency_sum += record.latency;
    }

    let total = records.len();
    ScoreResult {
        task,
        accuracy: correct as f64 / total as f64,
        latency_avg: latency_sum / total as f64,
        n: total,
    }
}

/// Task label for a result file: its name without extension
pub fn task_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load and score one result file
pub fn score_file(path: impl AsRef<Path>) -> Result<ScoreResult, LoadError> {
    let path = path.as_ref();
    let records = load_records_from_file(path)?;
    Ok(score_records(task_label(path), &records))
}

/// Load one result file and judge each record
pub fn inspect_file(path: impl AsRef<Path>) -> Result<Vec<RecordVerdict>, LoadError> {
    let records = load_records_from_file(path)?;
    Ok(judge_records(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Gold;

    #[test]
    fn test_multiple_choice_match() {
        let record = Record::new(["The answer is (B)."], "B", 1.0);
        let verdict = judge_record(0, &record);
        assert_eq!(verdict.domain, Domain::MultipleChoice);
        assert_eq!(verdict.gold_value, Some(1));
        assert_eq!(verdict.predicted_value, Some(1));
        assert!(!verdict.used_fallback);
        assert!(verdict.correct);
    }

    #[test]
    fn test_multiple_choice_last_mention_decides() {
        let record = Record::new(["I think it's A, but actually B"], "A", 1.0);
        let verdict = judge_record(0, &record);
        assert_eq!(verdict.predicted_value, Some(1));
        assert!(!verdict.correct);
    }

    #[test]
    fn test_yes_no_mismatch() {
        let record = Record::new(["After analysis, the answer is no."], true, 2.0);
        let verdict = judge_record(0, &record);
        assert_eq!(verdict.domain, Domain::YesNo);
        assert_eq!(verdict.gold_value, Some(1));
        assert_eq!(verdict.predicted_value, Some(0));
        assert!(!verdict.correct);
    }

    #[test]
    fn test_free_form_prefix_fallback_is_asymmetric() {
        // Known behavior: gold appearing after the start of the prediction does not count.
        let record = Record::new(["The city is Paris, France"], "Paris", 1.0);
        let verdict = judge_record(0, &record);
        assert_eq!(verdict.domain, Domain::FreeForm);
        assert!(verdict.used_fallback);
        assert!(!verdict.correct);

        let leading = Record::new(["Paris, France"], "paris", 1.0);
        assert!(judge_record(0, &leading).correct);

        // Gold longer than the prediction never matches.
        let short = Record::new(["Paris"], "Paris, France", 1.0);
        assert!(!judge_record(0, &short).correct);
    }

    #[test]
    fn test_extraction_miss_falls_back() {
        // Multiple-choice gold, but the prediction names no choice.
        let record = Record::new(["apple"], "A", 1.0);
        let verdict = judge_record(0, &record);
        assert_eq!(verdict.predicted_value, None);
        assert!(verdict.used_fallback);
        assert!(verdict.correct);

        let unparseable = Record::new(["no idea"], "C", 1.0);
        let verdict = judge_record(0, &unparseable);
        assert_eq!(verdict.predicted_value, None);
        assert!(verdict.used_fallback);
        assert!(!verdict.correct);
    }

    #[test]
    fn test_yes_no_gold_with_and_without_token() {
        let record = Record::new(["True story"], Gold::Bool(true), 1.0);
        let verdict = judge_record(0, &record);
        assert!(!verdict.used_fallback);
        assert!(verdict.correct);

        // No yes/no token: prefix match against "false".
        let record = Record::new(["maybe"], Gold::Bool(false), 1.0);
        let verdict = judge_record(0, &record);
        assert!(verdict.used_fallback);
        assert!(!verdict.correct);
    }

    #[test]
    fn test_consensus_feeds_prediction() {
        let record = Record::new(["C", "B", "b "], "B", 1.0);
        let verdict = judge_record(3, &record);
        assert_eq!(verdict.index, 3);
        assert_eq!(verdict.prediction, "b");
        assert!(verdict.correct);
    }

    #[test]
    fn test_score_records_accuracy_and_latency() {
        let records = vec![
            Record::new(["A"], "A", 1.0),
            Record::new(["B"], "C", 2.0),
            Record::new(["yes"], true, 3.0),
            Record::new(["The city is Paris"], "Paris", 6.0),
        ];

        let result = score_records("mixed", &records);
        assert_eq!(result.task, "mixed");
        assert_eq!(result.n, 4);
        assert!((result.accuracy - 0.5).abs() < 1e-12);
        assert!((result.latency_avg - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_records_empty() {
        let result = score_records("empty", &[]);
        assert_eq!(result, ScoreResult::empty("empty"));
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.latency_avg, 0.0);
        assert_eq!(result.n, 0);
    }

    #[test]
    fn test_all_multiple_choice_correct() {
        let records = vec![
            Record::new(["A", "a", "B"], "A", 0.5),
            Record::new(["Answer: C"], "C", 0.5),
            Record::new(["d", "D", "d"], "D", 0.5),
        ];
        assert_eq!(score_records("mmlu", &records).accuracy, 1.0);
    }

    #[test]
    fn test_task_label() {
        assert_eq!(task_label(Path::new("results/mmlu__cod__2024.json")), "mmlu__cod__2024");
        assert_eq!(task_label(Path::new("plain")), "plain");
    }
}
