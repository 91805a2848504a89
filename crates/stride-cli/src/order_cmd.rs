//! `stride order` and `stride critical-path` commands.

use anyhow::Result;

use stride_core::plan::PlanAnalysis;
use stride_core::step::Step;

/// Run the order command: the flat execution order plus parallel levels.
pub fn run_order(steps: &[Step], json: bool) -> Result<()> {
    let analysis = PlanAnalysis::from_steps(steps);
    let order = analysis.execution_order();

    if json {
        println!("{}", serde_json::to_string_pretty(&order)?);
        return Ok(());
    }

    if order.order.is_empty() {
        println!("Plan is empty.");
        return Ok(());
    }

    if analysis.graph.has_circular {
        println!("Plan has circular dependencies; falling back to numeric order.");
        println!("Run `stride validate` for details.");
        println!();
    }

    println!(
        "Order: {}",
        order
            .order
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    );
    println!();
    println!("Levels (steps in one level can run in parallel):");
    for (index, level) in order.levels.iter().enumerate() {
        let members = level
            .iter()
            .map(|n| describe(steps, *n))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {}: {members}", index + 1);
    }

    Ok(())
}

/// Run the critical-path command.
pub fn run_critical_path(steps: &[Step], json: bool) -> Result<()> {
    let analysis = PlanAnalysis::from_steps(steps);
    let critical = analysis.critical_path();

    if json {
        println!("{}", serde_json::to_string_pretty(&critical)?);
        return Ok(());
    }

    if analysis.graph.has_circular {
        println!("Plan has circular dependencies; the critical path is undefined.");
        println!("Run `stride validate` for details.");
        return Ok(());
    }
    if critical.path.is_empty() {
        println!("Plan is empty.");
        return Ok(());
    }

    println!(
        "Critical path ({} steps): {}",
        critical.length,
        critical
            .path
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    );
    for number in &critical.path {
        println!("  {}", describe(steps, *number));
    }

    Ok(())
}

/// `"3 (wire up parser)"`, or just the number when the record is missing.
fn describe(steps: &[Step], number: u32) -> String {
    match steps.iter().find(|s| s.number == number) {
        Some(step) if !step.title.is_empty() => format!("{number} ({})", step.title),
        _ => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::step::StepStatus;

    #[test]
    fn describe_includes_title_when_known() {
        let steps = vec![Step {
            number: 3,
            title: "wire up parser".to_owned(),
            status: StepStatus::Pending,
            body: String::new(),
            declared_number: Some(3),
            updated: None,
            path: None,
        }];
        assert_eq!(describe(&steps, 3), "3 (wire up parser)");
        assert_eq!(describe(&steps, 9), "9");
    }
}
