//! Answer normalization, domain extraction, consensus and scoring

pub mod consensus;
pub mod domain;
pub mod normalize;
pub mod scorer;

pub use consensus::{majority_vote, resolve_consensus};
pub use domain::{extract_choice, extract_yes_no, yes_no_from_gold, Domain, GoldClass};
pub use normalize::normalize;
pub use scorer::{
    fallback_match, inspect_file, judge_record, judge_records, score_file, score_records,
    task_label, RecordVerdict, ScoreResult,
};
