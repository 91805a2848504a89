//! Execution ordering: Kahn's algorithm with level tracking.

use std::collections::BTreeMap;

use super::types::{DependencyGraph, ExecutionOrder};

/// Compute a dependency-respecting execution order for the plan.
///
/// Acyclic graphs get a topological order built level by level: each level
/// is the ascending-sorted frontier of steps whose dependencies are all
/// satisfied by earlier levels, so the members of one level can run in
/// parallel.
///
/// Cyclic graphs degrade to the roster in ascending numeric order, as both
/// the flat order and a single level. No partial ordering is attempted:
/// breaking an arbitrary edge of a cycle would be a guess.
pub fn execution_order(roster: &[u32], graph: &DependencyGraph) -> ExecutionOrder {
    if graph.has_circular {
        let mut all: Vec<u32> = roster.to_vec();
        all.sort_unstable();
        all.dedup();
        return ExecutionOrder {
            order: all.clone(),
            levels: vec![all],
        };
    }

    let mut in_degree: BTreeMap<u32, usize> = graph
        .dependencies
        .iter()
        .map(|(&number, entry)| (number, entry.depends_on.len()))
        .collect();

    let mut frontier: Vec<u32> = graph.roots.clone();
    frontier.sort_unstable();

    let mut order: Vec<u32> = Vec::with_capacity(in_degree.len());
    let mut levels: Vec<Vec<u32>> = Vec::new();

    while !frontier.is_empty() {
        order.extend_from_slice(&frontier);

        let mut next: Vec<u32> = Vec::new();
        for &step in &frontier {
            for &blocked in &graph.dependencies[&step].blocked_by {
                let degree = in_degree
                    .get_mut(&blocked)
                    .expect("blocked_by references are roster-valid");
                *degree -= 1;
                if *degree == 0 {
                    next.push(blocked);
                }
            }
        }
        next.sort_unstable();

        levels.push(std::mem::replace(&mut frontier, next));
    }

    ExecutionOrder { order, levels }
}
