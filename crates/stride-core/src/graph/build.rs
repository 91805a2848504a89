//! Graph construction from a roster and raw per-step dependency lists.

use std::collections::{BTreeMap, BTreeSet};

use super::cycle::find_cycles;
use super::types::{DependencyGraph, StepDependency};

/// Build the bidirectional dependency graph for a plan.
///
/// `raw_deps` maps step numbers to the unfiltered lists produced by
/// [`super::extract_dependencies`] (or assembled by the caller). References
/// to numbers outside the roster are dropped here without being reported;
/// the validator operates on the pre-filter data and is the place where
/// they surface as errors. Self-references are roster-valid and are kept,
/// which makes a self-referencing step a one-step cycle.
///
/// Never fails; an empty roster yields an empty, acyclic graph.
pub fn build_graph(roster: &[u32], raw_deps: &BTreeMap<u32, Vec<u32>>) -> DependencyGraph {
    let known: BTreeSet<u32> = roster.iter().copied().collect();

    let mut dependencies: BTreeMap<u32, StepDependency> = known
        .iter()
        .map(|&number| {
            (
                number,
                StepDependency {
                    step_number: number,
                    depends_on: Vec::new(),
                    blocked_by: Vec::new(),
                },
            )
        })
        .collect();

    // Filter each raw list down to roster-valid references, then record
    // the forward edge and its reverse.
    for &step in &known {
        let Some(raw) = raw_deps.get(&step) else {
            continue;
        };
        let mut kept: Vec<u32> = raw
            .iter()
            .copied()
            .filter(|dep| known.contains(dep))
            .collect();
        kept.sort_unstable();
        kept.dedup();

        for &dep in &kept {
            dependencies
                .get_mut(&dep)
                .expect("dep is roster-valid")
                .blocked_by
                .push(step);
        }
        dependencies
            .get_mut(&step)
            .expect("step is roster-valid")
            .depends_on = kept;
    }

    let roots: Vec<u32> = dependencies
        .values()
        .filter(|d| d.depends_on.is_empty())
        .map(|d| d.step_number)
        .collect();
    let leaves: Vec<u32> = dependencies
        .values()
        .filter(|d| d.blocked_by.is_empty())
        .map(|d| d.step_number)
        .collect();

    let circular_chains = find_cycles(&dependencies);

    DependencyGraph {
        dependencies,
        roots,
        leaves,
        has_circular: !circular_chains.is_empty(),
        circular_chains,
    }
}
