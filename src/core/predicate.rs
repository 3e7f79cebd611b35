use crate::core::date_parser::extract_date;
use crate::domain::model::{DateField, Record};
use crate::utils::error::DateFieldError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Both dates present, valid and on or after the cutoff.
    #[cfg_attr(feature = "cli", value(name = "both"))]
    Both,
    /// At least one date present, valid and on or after the cutoff.
    #[cfg_attr(feature = "cli", value(name = "either"))]
    Either,
    /// Completion on or after the cutoff, then completion earlier in the cutoff year.
    #[cfg_attr(feature = "cli", value(name = "completion_year_tiered"))]
    CompletionYearTiered,
}

impl SelectionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionPolicy::Both => "both",
            SelectionPolicy::Either => "either",
            SelectionPolicy::CompletionYearTiered => "completion_year_tiered",
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(SelectionPolicy::Both),
            "either" => Ok(SelectionPolicy::Either),
            "completion_year_tiered" => Ok(SelectionPolicy::CompletionYearTiered),
            other => Err(format!(
                "unknown policy '{}' (expected both, either or completion_year_tiered)",
                other
            )),
        }
    }
}

/// Result of checking one date field of one record against the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    OnOrAfter(NaiveDate),
    Before(NaiveDate),
    Missing,
    Malformed,
}

impl DateCheck {
    pub fn evaluate(record: &Record, field: DateField, cutoff: NaiveDate) -> Self {
        match extract_date(record, field) {
            Ok(date) if date >= cutoff => DateCheck::OnOrAfter(date),
            Ok(date) => DateCheck::Before(date),
            Err(DateFieldError::MissingField { .. }) => DateCheck::Missing,
            Err(err @ DateFieldError::MalformedDate { .. }) => {
                tracing::debug!("Skipping unparseable date: {}", err);
                DateCheck::Malformed
            }
        }
    }

    pub fn passes(&self) -> bool {
        matches!(self, DateCheck::OnOrAfter(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    A,
    B,
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

pub fn passes_both(start: DateCheck, completion: DateCheck) -> bool {
    start.passes() && completion.passes()
}

pub fn passes_either(start: DateCheck, completion: DateCheck) -> bool {
    start.passes() || completion.passes()
}

pub fn completion_tier(completion: DateCheck, cutoff: NaiveDate) -> Option<Tier> {
    match completion {
        DateCheck::OnOrAfter(_) => Some(Tier::A),
        DateCheck::Before(date) if date >= start_of_year(cutoff) => Some(Tier::B),
        _ => None,
    }
}
