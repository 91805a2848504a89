//! `stride ready`, `stride blocked`, and `stride deps` commands.

use anyhow::Result;

use stride_core::graph::{blocked_steps, dependency_chain, ready_steps};
use stride_core::plan::PlanAnalysis;
use stride_core::step::Step;

/// Run the ready command: pending steps whose dependencies are all
/// completed.
pub fn run_ready(steps: &[Step], json: bool) -> Result<()> {
    let analysis = PlanAnalysis::from_steps(steps);
    let ready = ready_steps(steps, &analysis.graph);

    if json {
        println!("{}", serde_json::to_string_pretty(&ready)?);
        return Ok(());
    }

    if ready.is_empty() {
        println!("No steps are ready.");
        return Ok(());
    }
    println!("Ready steps:");
    for step in ready {
        println!("  {} ({})", step.number, step.title);
    }
    Ok(())
}

/// Run the blocked command: steps directly waiting on `step_number`.
pub fn run_blocked(steps: &[Step], step_number: u32, json: bool) -> Result<()> {
    let analysis = PlanAnalysis::from_steps(steps);
    let blocked = blocked_steps(steps, &analysis.graph, step_number);

    if json {
        println!("{}", serde_json::to_string_pretty(&blocked)?);
        return Ok(());
    }

    if blocked.is_empty() {
        println!("No steps are blocked by step {step_number}.");
        return Ok(());
    }
    println!("Steps blocked by step {step_number}:");
    for step in blocked {
        println!("  {} ({})", step.number, step.title);
    }
    Ok(())
}

/// Run the deps command: the transitive prerequisite chain of a step.
pub fn run_deps(steps: &[Step], step_number: u32, json: bool) -> Result<()> {
    let analysis = PlanAnalysis::from_steps(steps);
    let chain = dependency_chain(&analysis.graph, step_number);

    if json {
        println!("{}", serde_json::to_string_pretty(&chain)?);
        return Ok(());
    }

    if chain.is_empty() {
        println!("Step {step_number} has no prerequisites.");
        return Ok(());
    }
    println!("Step {step_number} transitively depends on:");
    for number in &chain {
        let title = steps
            .iter()
            .find(|s| s.number == *number)
            .map(|s| s.title.as_str())
            .unwrap_or("");
        if title.is_empty() {
            println!("  {number}");
        } else {
            println!("  {number} ({title})");
        }
    }
    Ok(())
}
