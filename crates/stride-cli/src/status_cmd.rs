//! `stride status` command: per-step status listing and plan progress.

use anyhow::Result;
use chrono::NaiveDate;

use stride_core::step::{Step, StepStatus};

/// Run the status command.
pub fn run_status(steps: &[Step], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    if steps.is_empty() {
        println!("Plan is empty.");
        return Ok(());
    }

    let completed = steps
        .iter()
        .filter(|s| s.status == StepStatus::Completed)
        .count();
    let in_progress = steps
        .iter()
        .filter(|s| s.status == StepStatus::InProgress)
        .count();
    let pending = steps
        .iter()
        .filter(|s| s.status == StepStatus::Pending)
        .count();

    println!("Progress: {completed}/{} completed", steps.len());
    println!("  pending={pending} in_progress={in_progress} completed={completed}");
    println!();

    println!("Steps:");
    for step in steps {
        let status_icon = match step.status {
            StepStatus::Pending => ".",
            StepStatus::InProgress => "*",
            StepStatus::Completed => "+",
        };
        let updated = format_updated(step.updated);
        println!(
            "  [{status_icon}] {:>3}  {}{updated}",
            step.number, step.title
        );
    }

    Ok(())
}

fn format_updated(updated: Option<NaiveDate>) -> String {
    match updated {
        Some(date) => format!("  (updated {})", date.format("%Y-%m-%d")),
        None => String::new(),
    }
}
