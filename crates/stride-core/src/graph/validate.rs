//! Dependency validation: turn raw declarations plus the built graph into
//! structured errors and warnings.
//!
//! The checks are independent; a single step can trigger several at once.
//! Everything is returned as data -- callers decide whether an error is
//! fatal. Errors: circular, self-reference, duplicate, invalid-step.
//! Warnings: long-chain, bottleneck.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::types::{
    DependencyError, DependencyErrorKind, DependencyGraph, DependencyValidation,
    DependencyWarning, DependencyWarningKind,
};

/// Longest acceptable dependency chain before a `long-chain` warning.
const MAX_CHAIN_LEN: usize = 5;

/// Number of direct dependents above which a step is flagged as a
/// bottleneck.
const MAX_DEPENDENTS: usize = 3;

/// Validate a plan's dependency declarations.
///
/// `raw_deps` must be the pre-filter lists (as produced by extraction):
/// duplicate and out-of-roster references are only visible there, since
/// the graph builder silently drops them.
pub fn validate_dependencies(
    roster: &[u32],
    raw_deps: &BTreeMap<u32, Vec<u32>>,
    graph: &DependencyGraph,
) -> DependencyValidation {
    let known: BTreeSet<u32> = roster.iter().copied().collect();
    let mut errors: Vec<DependencyError> = Vec::new();
    let mut warnings: Vec<DependencyWarning> = Vec::new();

    for &step in &known {
        let Some(raw) = raw_deps.get(&step) else {
            continue;
        };

        if raw.contains(&step) {
            errors.push(DependencyError {
                kind: DependencyErrorKind::SelfReference,
                step_number: step,
                related_steps: vec![step],
                message: format!("step {step} declares a dependency on itself"),
            });
        }

        // One duplicate error per repeat beyond the first occurrence.
        let mut occurrences: BTreeMap<u32, usize> = BTreeMap::new();
        for &dep in raw {
            *occurrences.entry(dep).or_insert(0) += 1;
        }
        for (&dep, &count) in &occurrences {
            for _ in 1..count {
                errors.push(DependencyError {
                    kind: DependencyErrorKind::Duplicate,
                    step_number: step,
                    related_steps: vec![dep],
                    message: format!("step {step} declares a duplicate dependency on step {dep}"),
                });
            }
        }

        for &dep in raw {
            if !known.contains(&dep) {
                errors.push(DependencyError {
                    kind: DependencyErrorKind::InvalidStep,
                    step_number: step,
                    related_steps: vec![dep],
                    message: format!("step {step} depends on unknown step {dep}"),
                });
            }
        }
    }

    // One circular error per deduplicated cycle, not per member.
    for chain in &graph.circular_chains {
        let joined = chain
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        errors.push(DependencyError {
            kind: DependencyErrorKind::Circular,
            step_number: chain[0],
            related_steps: chain.clone(),
            message: format!("circular dependency: {joined}"),
        });
    }

    let (chain_len, chain_end) = longest_chain(graph);
    if chain_len > MAX_CHAIN_LEN {
        warnings.push(DependencyWarning {
            kind: DependencyWarningKind::LongChain,
            step_number: chain_end,
            message: format!(
                "longest dependency chain has {chain_len} steps (ending at step {chain_end}), \
                 more than the recommended maximum of {MAX_CHAIN_LEN}"
            ),
        });
    }

    for entry in graph.dependencies.values() {
        let dependents = entry.blocked_by.len();
        if dependents > MAX_DEPENDENTS {
            warnings.push(DependencyWarning {
                kind: DependencyWarningKind::Bottleneck,
                step_number: entry.step_number,
                message: format!(
                    "step {} directly blocks {dependents} other steps",
                    entry.step_number
                ),
            });
        }
    }

    DependencyValidation {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Length of the longest dependency chain and the step it ends at.
///
/// Memoized DFS over `depends_on`; a per-node visiting guard stops
/// recursion if the graph were somehow cyclic mid-walk. Returns 0
/// immediately for cyclic graphs, where chain length is not meaningful.
fn longest_chain(graph: &DependencyGraph) -> (usize, u32) {
    if graph.has_circular {
        return (0, 0);
    }

    let mut memo: HashMap<u32, usize> = HashMap::new();
    let mut visiting: HashSet<u32> = HashSet::new();
    let mut best_len = 0usize;
    let mut best_end = 0u32;

    for &number in graph.dependencies.keys() {
        let len = chain_len(number, graph, &mut memo, &mut visiting);
        if len > best_len {
            best_len = len;
            best_end = number;
        }
    }

    (best_len, best_end)
}

fn chain_len(
    node: u32,
    graph: &DependencyGraph,
    memo: &mut HashMap<u32, usize>,
    visiting: &mut HashSet<u32>,
) -> usize {
    if let Some(&len) = memo.get(&node) {
        return len;
    }
    if !visiting.insert(node) {
        return 0;
    }

    let longest_dep = graph
        .dependencies
        .get(&node)
        .map(|entry| {
            entry
                .depends_on
                .iter()
                .map(|&dep| chain_len(dep, graph, memo, visiting))
                .max()
                .unwrap_or(0)
        })
        .unwrap_or(0);

    visiting.remove(&node);
    let len = longest_dep + 1;
    memo.insert(node, len);
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;

    fn deps(pairs: &[(u32, &[u32])]) -> BTreeMap<u32, Vec<u32>> {
        pairs
            .iter()
            .map(|&(n, list)| (n, list.to_vec()))
            .collect()
    }

    fn validate(roster: &[u32], raw: &BTreeMap<u32, Vec<u32>>) -> DependencyValidation {
        let graph = build_graph(roster, raw);
        validate_dependencies(roster, raw, &graph)
    }

    fn kinds(validation: &DependencyValidation) -> Vec<DependencyErrorKind> {
        validation.errors.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn clean_plan_is_valid() {
        let raw = deps(&[(1, &[]), (2, &[1]), (3, &[1, 2])]);
        let v = validate(&[1, 2, 3], &raw);
        assert!(v.valid);
        assert!(v.errors.is_empty());
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn self_reference_is_one_error() {
        let raw = deps(&[(3, &[3])]);
        let v = validate(&[3], &raw);
        let self_refs: Vec<_> = v
            .errors
            .iter()
            .filter(|e| e.kind == DependencyErrorKind::SelfReference)
            .collect();
        assert_eq!(self_refs.len(), 1);
        assert_eq!(self_refs[0].step_number, 3);
        // The self-loop is also a one-step cycle; both checks fire
        // independently.
        assert!(kinds(&v).contains(&DependencyErrorKind::Circular));
        assert!(!v.valid);
    }

    #[test]
    fn duplicate_reports_one_error_per_repeat() {
        let raw = deps(&[(4, &[2, 2, 2]), (2, &[])]);
        let v = validate(&[2, 4], &raw);
        let dups: Vec<_> = v
            .errors
            .iter()
            .filter(|e| e.kind == DependencyErrorKind::Duplicate)
            .collect();
        assert_eq!(dups.len(), 2, "three occurrences, two repeats");
        assert!(dups.iter().all(|e| e.step_number == 4 && e.related_steps == vec![2]));
    }

    #[test]
    fn invalid_step_reported_per_reference() {
        let raw = deps(&[(1, &[7, 8])]);
        let v = validate(&[1], &raw);
        let invalid: Vec<_> = v
            .errors
            .iter()
            .filter(|e| e.kind == DependencyErrorKind::InvalidStep)
            .collect();
        assert_eq!(invalid.len(), 2);
        assert!(!v.valid);
    }

    #[test]
    fn mutual_dependency_reports_exactly_one_circular_error() {
        let raw = deps(&[(1, &[2]), (2, &[1])]);
        let v = validate(&[1, 2], &raw);
        let circular: Vec<_> = v
            .errors
            .iter()
            .filter(|e| e.kind == DependencyErrorKind::Circular)
            .collect();
        assert_eq!(circular.len(), 1);
        assert_eq!(circular[0].message, "circular dependency: 1 -> 2 -> 1");
        assert_eq!(circular[0].related_steps, vec![1, 2, 1]);
    }

    #[test]
    fn long_chain_warns_past_five_steps() {
        // 1 <- 2 <- 3 <- 4 <- 5 <- 6: chain of six steps.
        let raw = deps(&[
            (1, &[]),
            (2, &[1]),
            (3, &[2]),
            (4, &[3]),
            (5, &[4]),
            (6, &[5]),
        ]);
        let v = validate(&[1, 2, 3, 4, 5, 6], &raw);
        assert!(v.valid, "warnings do not invalidate");
        let long: Vec<_> = v
            .warnings
            .iter()
            .filter(|w| w.kind == DependencyWarningKind::LongChain)
            .collect();
        assert_eq!(long.len(), 1);
        assert_eq!(long[0].step_number, 6);
    }

    #[test]
    fn chain_of_exactly_five_does_not_warn() {
        let raw = deps(&[(1, &[]), (2, &[1]), (3, &[2]), (4, &[3]), (5, &[4])]);
        let v = validate(&[1, 2, 3, 4, 5], &raw);
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn no_long_chain_warning_on_cyclic_graph() {
        let raw = deps(&[
            (1, &[6]),
            (2, &[1]),
            (3, &[2]),
            (4, &[3]),
            (5, &[4]),
            (6, &[5]),
        ]);
        let v = validate(&[1, 2, 3, 4, 5, 6], &raw);
        assert!(
            v.warnings
                .iter()
                .all(|w| w.kind != DependencyWarningKind::LongChain)
        );
    }

    #[test]
    fn bottleneck_warns_past_three_dependents() {
        let raw = deps(&[(1, &[]), (2, &[1]), (3, &[1]), (4, &[1]), (5, &[1])]);
        let v = validate(&[1, 2, 3, 4, 5], &raw);
        let bottlenecks: Vec<_> = v
            .warnings
            .iter()
            .filter(|w| w.kind == DependencyWarningKind::Bottleneck)
            .collect();
        assert_eq!(bottlenecks.len(), 1);
        assert_eq!(bottlenecks[0].step_number, 1);
    }

    #[test]
    fn exactly_three_dependents_is_not_a_bottleneck() {
        let raw = deps(&[(1, &[]), (2, &[1]), (3, &[1]), (4, &[1])]);
        let v = validate(&[1, 2, 3, 4], &raw);
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn a_step_can_trigger_several_checks_at_once() {
        // Step 2: self-reference, duplicate of it, and an unknown step.
        let raw = deps(&[(1, &[]), (2, &[2, 2, 9])]);
        let v = validate(&[1, 2], &raw);
        let step2_kinds = kinds(&v);
        assert!(step2_kinds.contains(&DependencyErrorKind::SelfReference));
        assert!(step2_kinds.contains(&DependencyErrorKind::Duplicate));
        assert!(step2_kinds.contains(&DependencyErrorKind::InvalidStep));
        assert!(step2_kinds.contains(&DependencyErrorKind::Circular));
    }
}
