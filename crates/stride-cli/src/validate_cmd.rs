//! `stride validate` command: the merged structural + dependency report.

use anyhow::Result;

use stride_core::plan::{validate_plan, PlanReport};
use stride_core::step::Step;

/// Run the validate command.
///
/// Prints the full plan report and fails (non-zero exit) when the plan is
/// invalid, so the command can gate scripts and CI.
pub fn run_validate(steps: &[Step], json: bool) -> Result<()> {
    let report = validate_plan(steps);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(steps, &report);
    }

    if !report.valid {
        let total = report.structural_errors.len() + report.dependency.errors.len();
        anyhow::bail!("plan validation failed with {total} error(s)");
    }
    Ok(())
}

fn print_report(steps: &[Step], report: &PlanReport) {
    println!("Steps: {}", steps.len());

    if report.valid
        && report.structural_warnings.is_empty()
        && report.dependency.warnings.is_empty()
    {
        println!("Plan is valid.");
        return;
    }

    if !report.structural_errors.is_empty() {
        println!();
        println!("Structural errors:");
        for error in &report.structural_errors {
            match &error.path {
                Some(path) => println!("  [{}] {} ({})", error.kind, error.message, path.display()),
                None => println!("  [{}] {}", error.kind, error.message),
            }
        }
    }

    if !report.dependency.errors.is_empty() {
        println!();
        println!("Dependency errors:");
        for error in &report.dependency.errors {
            println!("  [{}] {}", error.kind, error.message);
        }
    }

    let warnings = report
        .structural_warnings
        .iter()
        .map(|w| (w.kind.to_string(), w.message.clone()))
        .chain(
            report
                .dependency
                .warnings
                .iter()
                .map(|w| (w.kind.to_string(), w.message.clone())),
        );
    let warnings: Vec<(String, String)> = warnings.collect();
    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for (kind, message) in &warnings {
            println!("  [{kind}] {message}");
        }
    }

    println!();
    if report.valid {
        println!("Plan is valid (with warnings).");
    } else {
        println!("Plan is INVALID.");
    }
}
