//! Table rendering for step records and summaries

use std::fmt::Write;
use colored::Colorize;
use pagelib::config::PolicyKind;
use pagelib::engine::StepRecord;
use pagelib::summary::{Comparison, SimulationSummary};

/// Banner printed above each run
pub fn title(policy: PolicyKind) -> String {
    format!("\n{}\n", format!("===== {} Page Replacement =====", policy.name()).cyan().bold())
}

/// Horizontal rule sized for `frames` frame columns
pub fn separator(frames: usize) -> String {
    format!("+------+{}--------+", "------+".repeat(frames))
}

/// Separator, column titles, separator
pub fn header(frames: usize) -> String {
    let mut out = separator(frames);
    let _ = write!(out, "\n| {} |", "Page".bold());
    for i in 0..frames {
        let _ = write!(out, " {} |", format!("{:^4}", format!("F{}", i + 1)).bold());
    }
    let _ = write!(out, " {} |\n{}", "Status".bold(), separator(frames));
    out
}

/// One row of the table. The frame written on a fault is highlighted
pub fn row(record: &StepRecord) -> String {
    let mut out = format!("| {:>4} |", record.page);
    for (slot, frame) in record.frames.iter().enumerate() {
        let cell = match frame {
            Some(page) if record.loaded_slot == Some(slot) => format!("{page:^4}").yellow().bold().to_string(),
            Some(page) => format!("{page:^4}"),
            None => format!("{:^4}", "-").yellow().to_string(),
        };
        let _ = write!(out, " {cell} |");
    }
    if record.hit {
        let _ = write!(out, "  {}   |", "Hit".green());
    } else {
        let _ = write!(out, " {}  |", "Fault".red());
    }
    out
}

/// Fault count, hit ratio and fault rate
pub fn stats(summary: &SimulationSummary) -> String {
    let mut out = String::new();
    if summary.aborted {
        let _ = writeln!(out, "\n{}", format!("Aborted after {} references", summary.references).yellow());
    }
    let _ = writeln!(out, "\n{} = {}", "Total Page Faults".bold(), summary.faults.to_string().red());
    let _ = writeln!(
        out,
        "{}         = {} ({:.0}%)",
        "Hit Ratio".bold(),
        format!("{:.2}", summary.hit_ratio).green(),
        summary.hit_ratio * 100.0
    );
    let _ = write!(
        out,
        "{}        = {} ({:.0}%)",
        "Fault Rate".bold(),
        format!("{:.2}", summary.fault_rate).red(),
        summary.fault_rate * 100.0
    );
    out
}

/// A whole run as one table followed by its statistics
pub fn full_table(policy: PolicyKind, frames: usize, records: &[StepRecord], summary: &SimulationSummary) -> String {
    let mut out = title(policy);
    let _ = writeln!(out, "{}", header(frames));
    for record in records {
        let _ = writeln!(out, "{}", row(record));
    }
    let _ = writeln!(out, "{}", separator(frames));
    out.push_str(&stats(summary));
    out
}

/// Fault counts side by side, with the winner marked
pub fn comparison(comparison: &Comparison) -> String {
    let rule = "==============================".cyan();
    let mut out = format!("\n{rule}\n{}\n{rule}\n", "  Comparison Summary".bold());
    let _ = writeln!(out, "{:<12}{:>12}{:>12}", "Algorithm", "Page Faults", "Hit Ratio");
    let best = comparison.best();
    for summary in &comparison.summaries {
        let marker = if summary.aborted {
            " (aborted)".yellow().to_string()
        } else if Some(summary.policy) == best {
            " *".green().to_string()
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "{:<12}{:>12}{:>12.2}{marker}",
            summary.policy.name(),
            summary.faults,
            summary.hit_ratio
        );
    }
    out
}
