//! Plain-text rendering of reconstructed history for the terminal.

use std::fmt::Write;

use crate::history::{BoardStats, HistoryGroup};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One header line per group followed by its events, indented.
pub fn render_groups(groups: &[HistoryGroup], total: usize) -> String {
    let mut out = String::new();

    for group in groups {
        let when = group
            .timestamp
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "--".to_string());

        let _ = write!(out, "{} {} {}", group.icon, when, group.label());
        if group.checked_count > 0 {
            let _ = write!(out, " [{}/{}]", group.checked_count, total);
        }
        out.push('\n');

        for event in group.events.iter().skip(1) {
            let _ = writeln!(out, "    {}", event.label);
        }
    }

    out
}

pub fn render_stats(stats: &BoardStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "checked: {}/{} ({:.1}%)",
        stats.checked_cells, stats.total_cells, stats.percent_complete
    );
    let _ = writeln!(
        out,
        "patterns: {} complete, {} cells in a pattern",
        stats.completed_patterns, stats.in_pattern_cells
    );
    let _ = writeln!(
        out,
        "won: traditional={} to-do={}",
        stats.traditional_won, stats.todo_won
    );
    out
}
