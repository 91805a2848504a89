//! `stride graph` command: show the dependency graph.

use anyhow::Result;

use stride_core::plan::PlanAnalysis;
use stride_core::step::Step;

/// Run the graph command: roots, leaves, per-step edges, cycles.
pub fn run_graph(steps: &[Step], json: bool) -> Result<()> {
    let analysis = PlanAnalysis::from_steps(steps);
    let graph = &analysis.graph;

    if json {
        println!("{}", serde_json::to_string_pretty(graph)?);
        return Ok(());
    }

    if graph.dependencies.is_empty() {
        println!("Plan is empty.");
        return Ok(());
    }

    println!("Roots:  {}", join_numbers(&graph.roots));
    println!("Leaves: {}", join_numbers(&graph.leaves));
    println!();

    println!("Edges:");
    for entry in graph.dependencies.values() {
        if entry.depends_on.is_empty() {
            println!("  step {} (no dependencies)", entry.step_number);
        } else {
            println!(
                "  step {} <- {}",
                entry.step_number,
                join_numbers(&entry.depends_on)
            );
        }
    }

    if graph.has_circular {
        println!();
        println!("Cycles:");
        for chain in &graph.circular_chains {
            let joined = chain
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(" -> ");
            println!("  {joined}");
        }
    }

    Ok(())
}

fn join_numbers(numbers: &[u32]) -> String {
    if numbers.is_empty() {
        return "(none)".to_string();
    }
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
