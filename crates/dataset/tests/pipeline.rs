//! End-to-end pipeline test: import a synthetic daily ledger, split, fit
//! the baseline, aggregate to weekly means, evaluate all eight rules, and
//! export the result table.

use std::io::Write;

use driftwatch_core::Baseline;
use driftwatch_dataset::{train_test_split, weekly_means, CsvExporter, CsvImporter};
use driftwatch_rules::{Rule, RuleEngine, WeeklyReport};

/// Two training weeks of daily amounts oscillating around 10.0, then four
/// test weeks whose means step upward.
fn synthetic_ledger() -> String {
    let mut csv = String::from("day,week,amount\n");
    for day in 0..14 {
        let amount = if day % 2 == 0 { 9.5 } else { 10.5 };
        csv.push_str(&format!("2021-01-{:02},{},{}\n", day + 1, day / 7 + 1, amount));
    }
    for day in 0..28 {
        let week = day / 7 + 3;
        let amount = 10.0 + week as f64;
        csv.push_str(&format!("2021-02-{:02},{},{}\n", day + 1, week, amount));
    }
    csv
}

#[test]
fn full_pipeline_produces_result_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dataset.csv");
    let output = dir.path().join("results.csv");

    let mut file = std::fs::File::create(&input).unwrap();
    file.write_all(synthetic_ledger().as_bytes()).unwrap();

    let records = CsvImporter::import(&input).unwrap();
    assert_eq!(records.len(), 42);

    let (train, test) = train_test_split(&records, 14);
    let train_amounts: Vec<f64> = train.iter().map(|r| r.amount).collect();
    let baseline = Baseline::fit(&train_amounts).unwrap();
    assert!((baseline.mean - 10.0).abs() < 1e-10);

    let points = weekly_means(test);
    assert_eq!(points.len(), 4);
    assert_eq!(points[0].week, 3);
    assert!((points[0].amount - 13.0).abs() < 1e-10);

    let amounts: Vec<f64> = points.iter().map(|p| p.amount).collect();
    let matrix = RuleEngine::evaluate_all(&amounts, &baseline).unwrap();
    let report = WeeklyReport::assemble(&points, &matrix, baseline).unwrap();
    assert_eq!(report.rows.len(), 4);

    CsvExporter::export(&output, &report).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("week,Rule1"));
    assert!(lines[1].starts_with("3,"));

    // Weekly means 13..16 sit 3+ sample stddevs above the baseline mean of
    // 10, so the outlier rule fires for every test week.
    let rule1_col: Vec<&str> = lines[1..].iter().map(|l| l.split(',').nth(1).unwrap()).collect();
    assert_eq!(rule1_col, vec!["1", "1", "1", "1"]);
    assert_eq!(report.flagged_weeks(Rule::BeyondThreeSigma), 4);
}
