use crate::core::predicate::SelectionPolicy;
use crate::core::selector::{select, select_tiered};
use crate::domain::model::{FilterOutcome, Record};
use chrono::NaiveDate;

/// Runs a policy and, for the strict `both` policy, the `either` fallback.
///
/// The fallback only runs when the strict pass matched nothing, always reads
/// the original records, and is returned next to the strict result rather
/// than merged into it.
#[derive(Debug, Clone, Copy)]
pub struct FilterOrchestrator {
    cutoff: NaiveDate,
    fallback: bool,
}

impl FilterOrchestrator {
    pub fn new(cutoff: NaiveDate) -> Self {
        Self {
            cutoff,
            fallback: true,
        }
    }

    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback = enabled;
        self
    }

    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    pub fn run(&self, policy: SelectionPolicy, records: &[Record]) -> FilterOutcome {
        match policy {
            SelectionPolicy::Both => {
                let primary = select(records, self.cutoff, SelectionPolicy::Both);
                let fallback = if primary.is_empty() && self.fallback {
                    tracing::info!(
                        "No records with both dates on or after {}; trying either date",
                        self.cutoff
                    );
                    Some(select(records, self.cutoff, SelectionPolicy::Either))
                } else {
                    None
                };
                FilterOutcome::Conjunctive { primary, fallback }
            }
            SelectionPolicy::Either => {
                FilterOutcome::Disjunctive(select(records, self.cutoff, SelectionPolicy::Either))
            }
            SelectionPolicy::CompletionYearTiered => {
                FilterOutcome::Tiered(select_tiered(records, self.cutoff))
            }
        }
    }
}
