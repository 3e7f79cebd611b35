use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One housing project row. Field order is kept so records round-trip
/// unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Start,
    Completion,
}

impl DateField {
    pub fn field_name(self) -> &'static str {
        match self {
            DateField::Start => "project_start_date",
            DateField::Completion => "project_completion_date",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub total_input: usize,
    pub matched: usize,
    pub skipped_missing: usize,
    pub skipped_invalid: usize,
}

/// Records picked by one policy run, as positions in the source sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub stats: FilterStats,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records<'a>(&self, source: &'a [Record]) -> Vec<&'a Record> {
        self.indices.iter().filter_map(|&i| source.get(i)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TieredSelection {
    /// Completion on or after the cutoff.
    pub tier_a: Vec<usize>,
    /// Completion between January 1st of the cutoff year and the cutoff.
    pub tier_b: Vec<usize>,
    pub stats: FilterStats,
}

impl TieredSelection {
    pub fn combined(&self) -> Vec<usize> {
        self.tier_a.iter().chain(self.tier_b.iter()).copied().collect()
    }

    pub fn tier_a_records<'a>(&self, source: &'a [Record]) -> Vec<&'a Record> {
        self.tier_a.iter().filter_map(|&i| source.get(i)).collect()
    }

    pub fn tier_b_records<'a>(&self, source: &'a [Record]) -> Vec<&'a Record> {
        self.tier_b.iter().filter_map(|&i| source.get(i)).collect()
    }

    pub fn combined_records<'a>(&self, source: &'a [Record]) -> Vec<&'a Record> {
        self.combined().into_iter().filter_map(|i| source.get(i)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Strict pass, plus the looser pass kept apart when the strict one found nothing.
    Conjunctive {
        primary: Selection,
        fallback: Option<Selection>,
    },
    Disjunctive(Selection),
    Tiered(TieredSelection),
}

impl FilterOutcome {
    pub fn primary_stats(&self) -> FilterStats {
        match self {
            FilterOutcome::Conjunctive { primary, .. } => primary.stats,
            FilterOutcome::Disjunctive(selection) => selection.stats,
            FilterOutcome::Tiered(tiered) => tiered.stats,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub source: Vec<Record>,
    pub outcome: FilterOutcome,
}

/// What a finished run hands back to the reporting layer.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outputs: Vec<String>,
    pub outcome: FilterOutcome,
}
