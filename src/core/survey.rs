//! Exploratory look at the date fields of a dataset: per-year counts and the
//! records carrying any date on or after the cutoff.

use crate::core::predicate::DateCheck;
use crate::domain::model::{DateField, Record};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

const DATE_TERMS: [&str; 7] = [
    "date",
    "time",
    "open",
    "close",
    "deadline",
    "apply",
    "application",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTally {
    pub by_year: BTreeMap<i32, usize>,
    pub missing: usize,
    pub malformed: usize,
}

impl FieldTally {
    fn add(&mut self, check: DateCheck) {
        match check {
            DateCheck::Missing => self.missing += 1,
            DateCheck::Malformed => self.malformed += 1,
            DateCheck::OnOrAfter(date) | DateCheck::Before(date) => {
                *self.by_year.entry(date.year()).or_insert(0) += 1;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyMatch {
    pub index: usize,
    pub project_name: Option<String>,
    pub start_date: Option<String>,
    pub completion_date: Option<String>,
    pub matched_on: DateField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSurvey {
    pub cutoff: NaiveDate,
    pub total_records: usize,
    pub start: FieldTally,
    pub completion: FieldTally,
    pub matches: Vec<SurveyMatch>,
}

impl DateSurvey {
    pub fn build(records: &[Record], cutoff: NaiveDate) -> Self {
        let mut start = FieldTally::default();
        let mut completion = FieldTally::default();
        let mut matches = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let start_check = DateCheck::evaluate(record, DateField::Start, cutoff);
            let completion_check = DateCheck::evaluate(record, DateField::Completion, cutoff);
            start.add(start_check);
            completion.add(completion_check);

            // One entry per source record; the start date wins when both match.
            let matched_on = if start_check.passes() {
                Some(DateField::Start)
            } else if completion_check.passes() {
                Some(DateField::Completion)
            } else {
                None
            };

            if let Some(matched_on) = matched_on {
                matches.push(SurveyMatch {
                    index,
                    project_name: record.get_str("project_name").map(str::to_string),
                    start_date: record.get_str(DateField::Start.field_name()).map(str::to_string),
                    completion_date: record
                        .get_str(DateField::Completion.field_name())
                        .map(str::to_string),
                    matched_on,
                });
            }
        }

        Self {
            cutoff,
            total_records: records.len(),
            start,
            completion,
            matches,
        }
    }
}

/// Field names that look date related, from the first `sample` records, in
/// first-seen order.
pub fn date_like_fields(records: &[Record], sample: usize) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for record in records.iter().take(sample) {
        for key in record.data.keys() {
            let lower = key.to_lowercase();
            if DATE_TERMS.iter().any(|term| lower.contains(term)) && !found.contains(key) {
                found.push(key.clone());
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records(values: serde_json::Value) -> Vec<Record> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn test_year_histograms() {
        let input = records(json!([
            {"project_start_date": "2023-03-01T00:00:00.000", "project_completion_date": "2025-01-01T00:00:00.000"},
            {"project_start_date": "2023-07-01T00:00:00.000"},
            {"project_start_date": "oops", "project_completion_date": "2026-02-01T00:00:00.000"}
        ]));
        let survey = DateSurvey::build(&input, ymd(2025, 5, 1));

        assert_eq!(survey.total_records, 3);
        assert_eq!(survey.start.by_year.get(&2023), Some(&2));
        assert_eq!(survey.start.malformed, 1);
        assert_eq!(survey.completion.by_year.get(&2025), Some(&1));
        assert_eq!(survey.completion.by_year.get(&2026), Some(&1));
        assert_eq!(survey.completion.missing, 1);
    }

    #[test]
    fn test_same_named_projects_are_listed_separately() {
        let input = records(json!([
            {"project_name": "CONFIDENTIAL", "project_start_date": "2025-06-01"},
            {"project_name": "CONFIDENTIAL", "project_completion_date": "2025-09-01"},
            {"project_name": "Both", "project_start_date": "2025-06-01", "project_completion_date": "2025-09-01"}
        ]));
        let survey = DateSurvey::build(&input, ymd(2025, 5, 1));

        let summary: Vec<(usize, DateField)> =
            survey.matches.iter().map(|m| (m.index, m.matched_on)).collect();
        assert_eq!(
            summary,
            vec![
                (0, DateField::Start),
                (1, DateField::Completion),
                (2, DateField::Start)
            ]
        );
        assert_eq!(survey.matches[1].project_name.as_deref(), Some("CONFIDENTIAL"));
    }

    #[test]
    fn test_date_like_fields() {
        let input = records(json!([
            {"project_id": "1", "project_start_date": "x", "building_completion_date": "y"},
            {"project_id": "2", "Application_Deadline": "z", "borough": "Bronx"},
            {"reopening_time": "late"}
        ]));
        assert_eq!(
            date_like_fields(&input, 2),
            vec!["project_start_date", "building_completion_date", "Application_Deadline"]
        );
        assert_eq!(date_like_fields(&input, 5).len(), 4);
    }
}
