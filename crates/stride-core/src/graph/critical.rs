//! Critical path analysis: the longest chain of step dependencies.

use std::collections::BTreeMap;

use super::order::execution_order;
use super::types::{CriticalPath, DependencyGraph};

/// Find the longest dependency chain in the plan.
///
/// Walks the topological order forward, maintaining per step the longest
/// chain length ending there plus a back-pointer, then reconstructs the
/// chain from the step with the maximum recorded length. Ties resolve to
/// the smallest step number. Length counts steps (a plan with no edges
/// has a critical path of one step); there is no duration model.
///
/// The critical path is undefined on cyclic graphs: those return an empty
/// path of length 0 immediately.
pub fn critical_path(roster: &[u32], graph: &DependencyGraph) -> CriticalPath {
    if graph.has_circular {
        return CriticalPath {
            path: Vec::new(),
            length: 0,
        };
    }

    let order = execution_order(roster, graph).order;
    if order.is_empty() {
        return CriticalPath {
            path: Vec::new(),
            length: 0,
        };
    }

    let mut length: BTreeMap<u32, usize> = order.iter().map(|&n| (n, 1)).collect();
    let mut back: BTreeMap<u32, u32> = BTreeMap::new();

    for &step in &order {
        let through = length[&step] + 1;
        for &target in &graph.dependencies[&step].blocked_by {
            if through > length[&target] {
                length.insert(target, through);
                back.insert(target, step);
            }
        }
    }

    // Step with the maximum chain length; BTreeMap iteration plus the
    // strict comparison keeps ties on the smallest number.
    let (mut cursor, best_len) = length
        .iter()
        .fold((0u32, 0usize), |best, (&number, &len)| {
            if len > best.1 { (number, len) } else { best }
        });

    let mut path: Vec<u32> = vec![cursor];
    while let Some(&prev) = back.get(&cursor) {
        path.push(prev);
        cursor = prev;
    }
    path.reverse();

    CriticalPath {
        path,
        length: best_len,
    }
}
