//! Step queries over the built graph: ready, blocked, and prerequisite
//! chains.
//!
//! Out-of-graph step numbers yield empty results rather than errors, so
//! "not found" and "no relationships" look the same to the caller.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::step::{Step, StepStatus};

use super::types::DependencyGraph;

/// Steps that can start right now: pending, with every dependency
/// completed.
///
/// Completion status is owned by the step records themselves (the plan
/// directory on disk); this query only combines it with the graph. A
/// pending step with no dependencies is always ready.
pub fn ready_steps<'a>(steps: &'a [Step], graph: &DependencyGraph) -> Vec<&'a Step> {
    let status_by_number: HashMap<u32, StepStatus> =
        steps.iter().map(|s| (s.number, s.status)).collect();

    steps
        .iter()
        .filter(|step| step.status == StepStatus::Pending)
        .filter(|step| {
            graph
                .dependencies
                .get(&step.number)
                .is_none_or(|entry| {
                    entry.depends_on.iter().all(|dep| {
                        status_by_number.get(dep) == Some(&StepStatus::Completed)
                    })
                })
        })
        .collect()
}

/// The steps directly blocked by `step_number`, resolved to their records.
pub fn blocked_steps<'a>(
    steps: &'a [Step],
    graph: &DependencyGraph,
    step_number: u32,
) -> Vec<&'a Step> {
    let Some(entry) = graph.dependencies.get(&step_number) else {
        return Vec::new();
    };
    let by_number: HashMap<u32, &Step> = steps.iter().map(|s| (s.number, s)).collect();
    entry
        .blocked_by
        .iter()
        .filter_map(|n| by_number.get(n).copied())
        .collect()
}

/// Every step `step_number` transitively depends on, sorted ascending.
///
/// The walk follows `depends_on` edges with a visited set, so it
/// terminates on cyclic graphs; the starting step is never part of its
/// own chain.
pub fn dependency_chain(graph: &DependencyGraph, step_number: u32) -> Vec<u32> {
    if !graph.dependencies.contains_key(&step_number) {
        return Vec::new();
    }

    let mut chain: BTreeSet<u32> = BTreeSet::new();
    let mut seen: HashSet<u32> = HashSet::from([step_number]);
    let mut pending: Vec<u32> = vec![step_number];

    while let Some(node) = pending.pop() {
        let Some(entry) = graph.dependencies.get(&node) else {
            continue;
        };
        for &dep in &entry.depends_on {
            if seen.insert(dep) {
                chain.insert(dep);
                pending.push(dep);
            }
        }
    }

    chain.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use std::collections::BTreeMap;

    fn step(number: u32, status: StepStatus) -> Step {
        Step {
            number,
            title: format!("step {number}"),
            status,
            body: String::new(),
            declared_number: Some(number),
            updated: None,
            path: None,
        }
    }

    fn graph_for(roster: &[u32], pairs: &[(u32, &[u32])]) -> DependencyGraph {
        let raw: BTreeMap<u32, Vec<u32>> = pairs
            .iter()
            .map(|&(n, list)| (n, list.to_vec()))
            .collect();
        build_graph(roster, &raw)
    }

    #[test]
    fn ready_requires_pending_status_and_completed_deps() {
        let steps = vec![
            step(1, StepStatus::Completed),
            step(2, StepStatus::Pending),
            step(3, StepStatus::Pending),
            step(4, StepStatus::InProgress),
        ];
        let graph = graph_for(&[1, 2, 3, 4], &[(2, &[1]), (3, &[2]), (4, &[1])]);

        let ready: Vec<u32> = ready_steps(&steps, &graph).iter().map(|s| s.number).collect();
        // 2 is pending with dep 1 completed; 3 waits on pending 2; 4 is
        // already in progress.
        assert_eq!(ready, vec![2]);
    }

    #[test]
    fn ready_never_returns_non_pending_steps() {
        let steps = vec![step(1, StepStatus::Completed), step(2, StepStatus::InProgress)];
        let graph = graph_for(&[1, 2], &[]);
        assert!(ready_steps(&steps, &graph).is_empty());
    }

    #[test]
    fn pending_step_with_no_deps_is_ready() {
        let steps = vec![step(1, StepStatus::Pending)];
        let graph = graph_for(&[1], &[]);
        assert_eq!(ready_steps(&steps, &graph).len(), 1);
    }

    #[test]
    fn self_referencing_step_is_never_ready() {
        let steps = vec![step(1, StepStatus::Pending)];
        let graph = graph_for(&[1], &[(1, &[1])]);
        assert!(ready_steps(&steps, &graph).is_empty());
    }

    #[test]
    fn blocked_steps_resolve_to_records() {
        let steps = vec![
            step(1, StepStatus::Pending),
            step(2, StepStatus::Pending),
            step(3, StepStatus::Pending),
        ];
        let graph = graph_for(&[1, 2, 3], &[(2, &[1]), (3, &[1])]);
        let blocked: Vec<u32> = blocked_steps(&steps, &graph, 1).iter().map(|s| s.number).collect();
        assert_eq!(blocked, vec![2, 3]);
    }

    #[test]
    fn blocked_steps_for_unknown_number_is_empty() {
        let steps = vec![step(1, StepStatus::Pending)];
        let graph = graph_for(&[1], &[]);
        assert!(blocked_steps(&steps, &graph, 42).is_empty());
    }

    #[test]
    fn dependency_chain_is_transitive_and_sorted() {
        let graph = graph_for(&[1, 2, 3, 4, 5], &[(5, &[4, 3]), (4, &[2]), (3, &[2]), (2, &[1])]);
        assert_eq!(dependency_chain(&graph, 5), vec![1, 2, 3, 4]);
        assert_eq!(dependency_chain(&graph, 2), vec![1]);
        assert_eq!(dependency_chain(&graph, 1), Vec::<u32>::new());
    }

    #[test]
    fn dependency_chain_unknown_step_is_empty() {
        let graph = graph_for(&[1], &[]);
        assert_eq!(dependency_chain(&graph, 9), Vec::<u32>::new());
    }

    #[test]
    fn dependency_chain_terminates_on_cycles() {
        let graph = graph_for(&[1, 2, 3], &[(1, &[2]), (2, &[3]), (3, &[1])]);
        // 1's prerequisites reach 2 and 3; the cycle back to 1 itself is
        // not re-entered.
        assert_eq!(dependency_chain(&graph, 1), vec![2, 3]);
    }

    #[test]
    fn dependency_chain_is_idempotent_and_composes() {
        let graph = graph_for(&[1, 2, 3, 4], &[(4, &[2, 3]), (3, &[1]), (2, &[1])]);
        let first = dependency_chain(&graph, 4);
        let second = dependency_chain(&graph, 4);
        assert_eq!(first, second);

        // The chain equals the union of the direct dependencies and their
        // own chains.
        let mut expected: BTreeSet<u32> = BTreeSet::new();
        for &dep in &graph.dependencies[&4].depends_on {
            expected.insert(dep);
            expected.extend(dependency_chain(&graph, dep));
        }
        assert_eq!(first, expected.into_iter().collect::<Vec<u32>>());
    }
}
