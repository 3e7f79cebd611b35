use chrono::NaiveDate;
use housing_filter::core::date_parser::parse_date_value;
use housing_filter::core::selector::{select, select_tiered};
use housing_filter::domain::model::DateField;
use housing_filter::{DateFieldError, FilterOrchestrator, FilterOutcome, Record, SelectionPolicy};
use serde_json::json;

fn cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
}

fn records(values: serde_json::Value) -> Vec<Record> {
    serde_json::from_value(values).unwrap()
}

fn mixed_dataset() -> Vec<Record> {
    records(json!([
        {"project_name": "A", "project_start_date": "2025-05-01T00:00:00.000", "project_completion_date": "2025-05-01T00:00:00.000"},
        {"project_name": "B", "project_start_date": "2024-11-01T00:00:00.000", "project_completion_date": "2025-03-01T00:00:00.000"},
        {"project_name": "C", "project_completion_date": "2026-08-01T00:00:00.000"},
        {"project_name": "D"},
        {"project_name": "E", "project_start_date": "", "project_completion_date": null},
        {"project_name": "F", "project_start_date": "2025/06/01", "project_completion_date": "2025-01-01T00:00:00.000"},
        {"project_name": "G", "project_start_date": "2023-01-01T00:00:00.000", "project_completion_date": "2024-12-31T00:00:00.000"}
    ]))
}

#[test]
fn boundary_date_equal_to_cutoff_passes_every_policy() {
    let input = records(json!([{
        "project_start_date": "2025-05-01T00:00:00.000",
        "project_completion_date": "2025-05-01T00:00:00.000"
    }]));
    assert_eq!(select(&input, cutoff(), SelectionPolicy::Both).indices, vec![0]);
    assert_eq!(select(&input, cutoff(), SelectionPolicy::Either).indices, vec![0]);
    assert_eq!(select_tiered(&input, cutoff()).tier_a, vec![0]);
}

#[test]
fn dateless_records_excluded_and_counted_per_checked_field() {
    let input = records(json!([{"project_name": "D"}, {"project_name": "E", "project_start_date": ""}]));

    for policy in [SelectionPolicy::Both, SelectionPolicy::Either] {
        let selection = select(&input, cutoff(), policy);
        assert!(selection.is_empty());
        assert_eq!(selection.stats.skipped_missing, 4);
        assert_eq!(selection.stats.skipped_invalid, 0);
    }

    let tiered = select_tiered(&input, cutoff());
    assert!(tiered.combined().is_empty());
    assert_eq!(tiered.stats.skipped_missing, 2);
}

#[test]
fn completion_only_record_example() {
    let input = records(json!([{"project_completion_date": "2025-05-01T00:00:00.000"}]));

    let both = select(&input, cutoff(), SelectionPolicy::Both);
    assert!(both.is_empty());
    assert_eq!(both.stats.skipped_missing, 1);

    let either = select(&input, cutoff(), SelectionPolicy::Either);
    assert_eq!(either.indices, vec![0]);
}

#[test]
fn early_start_date_example() {
    let input = records(json!([{
        "project_start_date": "2025-04-30T00:00:00.000",
        "project_completion_date": "2025-06-01T00:00:00.000"
    }]));
    assert!(select(&input, cutoff(), SelectionPolicy::Both).is_empty());
}

#[test]
fn malformed_date_example() {
    let value = json!("not-a-date");
    assert!(matches!(
        parse_date_value(DateField::Completion, Some(&value)),
        Err(DateFieldError::MalformedDate { .. })
    ));

    let input = records(json!([{"project_completion_date": "not-a-date"}]));
    let either = select(&input, cutoff(), SelectionPolicy::Either);
    assert!(either.is_empty());
    assert_eq!(either.stats.skipped_invalid, 1);
    assert_eq!(either.stats.skipped_missing, 1);
}

#[test]
fn tiers_never_overlap() {
    let input = mixed_dataset();
    let tiered = select_tiered(&input, cutoff());

    assert_eq!(tiered.tier_a, vec![0, 2]);
    assert_eq!(tiered.tier_b, vec![1, 5]);
    for index in &tiered.tier_a {
        assert!(!tiered.tier_b.contains(index));
    }
    assert_eq!(tiered.stats.matched, tiered.tier_a.len() + tiered.tier_b.len());
}

#[test]
fn fallback_reads_original_input_not_primary_result() {
    let input = records(json!([
        {"project_name": "C", "project_completion_date": "2026-08-01T00:00:00.000"},
        {"project_name": "S", "project_start_date": "2025-09-01T00:00:00.000", "project_completion_date": "bad"}
    ]));

    let outcome = FilterOrchestrator::new(cutoff()).run(SelectionPolicy::Both, &input);
    let FilterOutcome::Conjunctive { primary, fallback } = outcome else {
        panic!("expected conjunctive outcome");
    };

    assert!(primary.is_empty());
    let fallback = fallback.unwrap();
    assert_eq!(fallback, select(&input, cutoff(), SelectionPolicy::Either));
    assert_eq!(fallback.indices, vec![0, 1]);
    assert_eq!(fallback.stats.total_input, input.len());
}

#[test]
fn repeated_runs_match_exactly() {
    let input = mixed_dataset();
    let orchestrator = FilterOrchestrator::new(cutoff());

    for policy in [
        SelectionPolicy::Both,
        SelectionPolicy::Either,
        SelectionPolicy::CompletionYearTiered,
    ] {
        let first = orchestrator.run(policy, &input);
        let second = orchestrator.run(policy, &input);
        assert_eq!(first, second);
    }
}

#[test]
fn mixed_dataset_counts() {
    let input = mixed_dataset();

    let both = select(&input, cutoff(), SelectionPolicy::Both);
    assert_eq!(both.indices, vec![0]);
    // C: start missing; D: two missing; E: two missing (empty and null).
    assert_eq!(both.stats.skipped_missing, 5);
    // F: slash-separated start date.
    assert_eq!(both.stats.skipped_invalid, 1);

    let either = select(&input, cutoff(), SelectionPolicy::Either);
    assert_eq!(either.indices, vec![0, 2]);
}
