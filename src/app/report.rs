//! Console rendering of run results. The filter only returns counts; this is
//! where they turn into text.

use crate::core::survey::DateSurvey;
use crate::domain::model::{FilterOutcome, FilterStats, RunReport};
use std::fmt::Write;

fn write_stats(out: &mut String, label: &str, stats: &FilterStats) {
    let _ = writeln!(out, "{}:", label);
    let _ = writeln!(out, "  Total input:     {}", stats.total_input);
    let _ = writeln!(out, "  Matched:         {}", stats.matched);
    let _ = writeln!(out, "  Skipped missing: {}", stats.skipped_missing);
    let _ = writeln!(out, "  Skipped invalid: {}", stats.skipped_invalid);
}

pub fn render_run_report(report: &RunReport) -> String {
    let mut out = String::new();

    match &report.outcome {
        FilterOutcome::Conjunctive { primary, fallback } => {
            write_stats(&mut out, "Both dates on or after cutoff", &primary.stats);
            match fallback {
                Some(fallback) => {
                    write_stats(&mut out, "Fallback: either date on or after cutoff", &fallback.stats)
                }
                None if primary.is_empty() => {
                    let _ = writeln!(out, "Fallback: not run");
                }
                None => {}
            }
        }
        FilterOutcome::Disjunctive(selection) => {
            write_stats(&mut out, "Either date on or after cutoff", &selection.stats);
        }
        FilterOutcome::Tiered(tiered) => {
            write_stats(&mut out, "Completion date tiers", &tiered.stats);
            let _ = writeln!(out, "  Tier A (on or after cutoff): {}", tiered.tier_a.len());
            let _ = writeln!(out, "  Tier B (earlier that year):  {}", tiered.tier_b.len());
        }
    }

    for path in &report.outputs {
        let _ = writeln!(out, "Saved: {}", path);
    }
    out
}

pub fn render_survey(survey: &DateSurvey, date_fields: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analyzed {} records", survey.total_records);

    if !date_fields.is_empty() {
        let _ = writeln!(out, "\nDate-related fields: {}", date_fields.join(", "));
    }

    for (label, tally) in [
        ("Project start dates by year", &survey.start),
        ("Project completion dates by year", &survey.completion),
    ] {
        let _ = writeln!(out, "\n{}:", label);
        for (year, count) in &tally.by_year {
            let _ = writeln!(out, "{}: {} projects", year, count);
        }
        let _ = writeln!(out, "(missing: {}, invalid: {})", tally.missing, tally.malformed);
    }

    let _ = writeln!(out, "\nProjects with dates on or after {}:", survey.cutoff);
    for (n, m) in survey.matches.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} (record #{})",
            n + 1,
            m.project_name.as_deref().unwrap_or("N/A"),
            m.index
        );
        let _ = writeln!(out, "   Start Date: {}", m.start_date.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "   Completion Date: {}", m.completion_date.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "   Matched on: {}", m.matched_on);
    }
    out
}
