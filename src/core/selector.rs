use crate::core::predicate::{
    completion_tier, passes_both, passes_either, DateCheck, SelectionPolicy, Tier,
};
use crate::domain::model::{DateField, FilterStats, Record, Selection, TieredSelection};
use chrono::NaiveDate;

fn tally(stats: &mut FilterStats, check: DateCheck) {
    match check {
        DateCheck::Missing => stats.skipped_missing += 1,
        DateCheck::Malformed => stats.skipped_invalid += 1,
        DateCheck::OnOrAfter(_) | DateCheck::Before(_) => {}
    }
}

/// Runs a pass/fail policy over `records`, keeping source order.
///
/// `CompletionYearTiered` is accepted here and flattened to tier A then
/// tier B; use [`select_tiered`] to keep the tiers apart.
pub fn select(records: &[Record], cutoff: NaiveDate, policy: SelectionPolicy) -> Selection {
    if policy == SelectionPolicy::CompletionYearTiered {
        let tiered = select_tiered(records, cutoff);
        return Selection {
            indices: tiered.combined(),
            stats: tiered.stats,
        };
    }

    let mut stats = FilterStats {
        total_input: records.len(),
        ..FilterStats::default()
    };
    let mut indices = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let start = DateCheck::evaluate(record, DateField::Start, cutoff);
        let completion = DateCheck::evaluate(record, DateField::Completion, cutoff);
        tally(&mut stats, start);
        tally(&mut stats, completion);

        let keep = match policy {
            SelectionPolicy::Both => passes_both(start, completion),
            _ => passes_either(start, completion),
        };
        if keep {
            indices.push(index);
        }
    }

    stats.matched = indices.len();
    tracing::debug!(
        "Policy {} matched {} of {} records",
        policy,
        stats.matched,
        stats.total_input
    );

    Selection { indices, stats }
}

pub fn select_tiered(records: &[Record], cutoff: NaiveDate) -> TieredSelection {
    let mut stats = FilterStats {
        total_input: records.len(),
        ..FilterStats::default()
    };
    let mut tier_a = Vec::new();
    let mut tier_b = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let completion = DateCheck::evaluate(record, DateField::Completion, cutoff);
        tally(&mut stats, completion);

        match completion_tier(completion, cutoff) {
            Some(Tier::A) => tier_a.push(index),
            Some(Tier::B) => tier_b.push(index),
            None => {}
        }
    }

    stats.matched = tier_a.len() + tier_b.len();
    tracing::debug!(
        "Tiered selection: {} after cutoff, {} earlier in {}",
        tier_a.len(),
        tier_b.len(),
        cutoff.format("%Y")
    );

    TieredSelection {
        tier_a,
        tier_b,
        stats,
    }
}
