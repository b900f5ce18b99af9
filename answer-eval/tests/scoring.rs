//! End-to-end scoring through result files on disk

use std::path::PathBuf;

use answer_eval::prelude::*;
use tempfile::TempDir;

fn write_records(dir: &TempDir, name: &str, records: &[Record]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(records).unwrap()).unwrap();
    path
}

#[test]
fn all_multiple_choice_correct_scores_one() {
    let dir = TempDir::new().unwrap();
    let path = write_records(
        &dir,
        "arc__cod.json",
        &[
            Record::new(["Let me think. The answer is A."], "A", 1.0).with_id("arc-1"),
            Record::new(["B", "b ", "C"], "B", 2.0).with_id("arc-2"),
            Record::new(["3"], "D", 3.0).with_id("arc-3"),
        ],
    );

    let result = score_file(&path).unwrap();
    assert_eq!(result.task, "arc__cod");
    assert_eq!(result.n, 3);
    assert_eq!(result.accuracy, 1.0);
    assert_eq!(result.latency_avg, 2.0);
}

#[test]
fn empty_file_scores_zero_without_nan() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, "[]").unwrap();

    let result = score_file(&path).unwrap();
    assert_eq!(result, ScoreResult::empty("empty"));
    assert!(!result.accuracy.is_nan());
    assert!(!result.latency_avg.is_nan());
}

#[test]
fn mixed_domains_in_one_file() {
    let dir = TempDir::new().unwrap();
    let path = write_records(
        &dir,
        "mixed.json",
        &[
            // multiple-choice, last mention wins: B != A
            Record::new(["I think it's A, but actually B"], "A", 1.0),
            // yes/no mismatch
            Record::new(["After analysis, the answer is no."], true, 1.0),
            // free-form prefix fallback, known asymmetric behavior
            Record::new(["The city is Paris, France"], "Paris", 1.0),
            Record::new(["Paris is the capital"], "paris", 1.0),
        ],
    );

    let result = score_file(&path).unwrap();
    assert_eq!(result.n, 4);
    assert_eq!(result.accuracy, 0.25);
}

#[test]
fn inspect_reports_each_record() {
    let dir = TempDir::new().unwrap();
    let path = write_records(
        &dir,
        "strategyqa.json",
        &[
            Record::new(["yes"], true, 1.0),
            Record::new(["no", "No.", "yes"], Gold::from("no"), 1.0),
        ],
    );

    let verdicts = answer_eval::analysis::inspect_file(&path).unwrap();
    assert_eq!(verdicts.len(), 2);
    assert!(verdicts.iter().all(|v| v.domain == Domain::YesNo));
    assert_eq!(verdicts[1].prediction, "no");
    assert!(verdicts.iter().all(|v| v.correct));
}

#[tokio::test]
async fn aggregator_writes_table_in_input_order() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_records(&dir, "z_last_alphabetically.json", &[Record::new(["A"], "A", 1.0)]),
        write_records(&dir, "a_first_alphabetically.json", &[Record::new(["B"], "A", 1.0)]),
    ];

    let table = Aggregator::new(AggregatorConfig { parallel_files: 2 })
        .run(&paths)
        .await
        .unwrap();

    let out = dir.path().join("results/summary.csv");
    table.write(&out, SummaryFormat::Csv).unwrap();

    let csv = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "task,accuracy,latency_avg,n",
            "z_last_alphabetically,1.0,1.0,1",
            "a_first_alphabetically,0.0,1.0,1",
        ]
    );
}

#[test]
fn schema_error_aborts_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(
        &path,
        r#"[{"answers": ["A"], "gold": "A", "latency": 1.0},
            {"answers": ["B"], "gold": "B"}]"#,
    )
    .unwrap();

    match score_file(&path) {
        Err(LoadError::Schema { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected schema error, got {:?}", other),
    }
}
