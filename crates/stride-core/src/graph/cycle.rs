//! Cycle detection over the built graph.
//!
//! A depth-first search runs from every node independently with fresh
//! visited/stack state, following `depends_on` edges. Revisiting a node
//! that is already on the active recursion stack closes a cycle. The same
//! cycle is discovered once per member this way, so after the scan each
//! chain is rotated to start at its smallest member and duplicates are
//! dropped.
//!
//! An SCC enumeration (Tarjan/Johnson) would find the same cycles with
//! better asymptotics; at plan sizes of tens of steps the per-node DFS is
//! plenty.

use std::collections::{BTreeMap, HashSet};

use super::types::StepDependency;

/// Find every circular chain in the graph.
///
/// Each returned chain starts at its numerically smallest member and ends
/// by repeating that member (`[1, 2, 1]` for a mutual dependency between
/// steps 1 and 2). Acyclic graphs return an empty list.
pub fn find_cycles(dependencies: &BTreeMap<u32, StepDependency>) -> Vec<Vec<u32>> {
    let mut raw_cycles: Vec<Vec<u32>> = Vec::new();

    for &start in dependencies.keys() {
        let mut visited: HashSet<u32> = HashSet::new();
        let mut stack: Vec<u32> = Vec::new();
        walk(start, dependencies, &mut visited, &mut stack, &mut raw_cycles);
    }

    let mut seen: HashSet<Vec<u32>> = HashSet::new();
    raw_cycles
        .into_iter()
        .map(normalize)
        .filter(|chain| seen.insert(chain.clone()))
        .collect()
}

fn walk(
    node: u32,
    dependencies: &BTreeMap<u32, StepDependency>,
    visited: &mut HashSet<u32>,
    stack: &mut Vec<u32>,
    cycles: &mut Vec<Vec<u32>>,
) {
    if let Some(pos) = stack.iter().position(|&n| n == node) {
        // The slice from the node's first occurrence to the current tail,
        // closed by repeating the start.
        let mut chain = stack[pos..].to_vec();
        chain.push(node);
        cycles.push(chain);
        return;
    }
    if !visited.insert(node) {
        return;
    }

    stack.push(node);
    if let Some(entry) = dependencies.get(&node) {
        for &dep in &entry.depends_on {
            walk(dep, dependencies, visited, stack, cycles);
        }
    }
    stack.pop();
}

/// Rotate a closed chain so it starts (and ends) at its smallest member.
fn normalize(chain: Vec<u32>) -> Vec<u32> {
    let open = &chain[..chain.len() - 1];
    let min_pos = open
        .iter()
        .enumerate()
        .min_by_key(|&(_, &n)| n)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut rotated: Vec<u32> = Vec::with_capacity(chain.len());
    rotated.extend_from_slice(&open[min_pos..]);
    rotated.extend_from_slice(&open[..min_pos]);
    rotated.push(open[min_pos]);
    rotated
}
