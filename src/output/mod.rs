//! Terminal summaries for `run` and `status`.

use crate::core::QualityReport;
use crate::history::RunRecord;
use crate::scheduler::{CycleOutcome, ScheduleState};
use colored::*;
use std::fmt::Write;

fn divider() -> ColoredString {
    "=".repeat(44).bright_blue()
}

fn colored_tier(tier: &str) -> ColoredString {
    match tier {
        "target achieved" | "very good" | "healthy" => tier.green().bold(),
        "good" | "warning" => tier.yellow().bold(),
        _ => tier.red().bold(),
    }
}

fn format_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "n/a".to_string(), |r| format!("{:.0}%", r))
}

fn write_report(output: &mut String, report: &QualityReport) {
    writeln!(
        output,
        "Overall score: {} ({}, health {:.0}/100 {})",
        format!("{:.2}", report.overall_score).bright_white().bold(),
        colored_tier(&report.tier),
        report.health_percentage(),
        colored_tier(&report.health_status)
    )
    .unwrap();

    for factor in &report.factors {
        writeln!(
            output,
            "  {:<14} {:.2}  x{:.2}  {}",
            factor.name,
            factor.value,
            factor.weight,
            factor.rationale.dimmed()
        )
        .unwrap();
    }

    if !report.recommendations.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "{}", "Recommendations".bright_yellow().bold()).unwrap();
        for (idx, rec) in report.recommendations.iter().enumerate() {
            writeln!(output, "  {}. {}", idx + 1, rec).unwrap();
        }
    }
}

fn write_decisions(output: &mut String, record: &RunRecord) {
    if record.decisions.is_empty() {
        writeln!(output, "No candidates proposed").unwrap();
        return;
    }
    writeln!(output, "{}", "Decisions".bright_yellow().bold()).unwrap();
    for decision in &record.decisions {
        let status = match (&decision.failure_reason, decision.applied) {
            (Some(reason), _) => format!("failed: {}", reason).red(),
            (None, true) => "applied".green(),
            (None, false) => "below threshold".dimmed(),
        };
        writeln!(output, "  {:<30} {}", decision.candidate_id, status).unwrap();
    }
}

fn write_schedule(output: &mut String, schedule: &ScheduleState) {
    writeln!(
        output,
        "Next run in {}s (recent success rate {})",
        schedule.next_interval_seconds,
        format_rate(schedule.recent_success_rate)
    )
    .unwrap();
}

/// Summary of one completed cycle
pub fn format_cycle_summary(outcome: &CycleOutcome) -> String {
    let mut output = String::new();
    writeln!(output, "{}", divider()).unwrap();
    writeln!(
        output,
        "    {}",
        format!("debtpilot run #{}", outcome.record.sequence)
            .bright_white()
            .bold()
    )
    .unwrap();
    writeln!(output, "{}", divider()).unwrap();

    write_report(&mut output, &outcome.record.report);
    writeln!(output).unwrap();
    write_decisions(&mut output, &outcome.record);
    writeln!(output).unwrap();
    write_schedule(&mut output, &outcome.schedule);
    output
}

pub fn print_cycle_summary(outcome: &CycleOutcome) {
    println!("{}", format_cycle_summary(outcome));
}

/// Latest persisted state of a project
pub fn format_status(
    latest: Option<&RunRecord>,
    schedule: Option<&ScheduleState>,
    success_rate: Option<f64>,
) -> String {
    let mut output = String::new();
    let Some(record) = latest else {
        writeln!(output, "No runs recorded yet").unwrap();
        return output;
    };

    writeln!(
        output,
        "Last run #{} at {}",
        record.sequence,
        record.report.timestamp.to_rfc3339()
    )
    .unwrap();
    write_report(&mut output, &record.report);
    writeln!(output).unwrap();
    writeln!(
        output,
        "Applied {} of {} candidates",
        record.applied_count(),
        record.decisions.len()
    )
    .unwrap();
    writeln!(output, "Recent success rate: {}", format_rate(success_rate)).unwrap();

    if let Some(schedule) = schedule {
        if let Some(next) = schedule.next_run_at() {
            writeln!(output, "Next run due at {}", next.to_rfc3339()).unwrap();
        }
    }
    output
}
