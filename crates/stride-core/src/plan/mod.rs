//! Plan-level analysis: ties loaded steps to the dependency engine.
//!
//! [`PlanAnalysis`] is the snapshot the CLI works from: the roster, the
//! raw (pre-filter) dependency lists extracted from each step's text, and
//! the built graph. It is recomputed from the current step records on
//! every use; nothing is cached across calls.

pub mod report;

use std::collections::BTreeMap;

use crate::graph::{
    self, CriticalPath, DependencyGraph, DependencyValidation, ExecutionOrder,
};
use crate::step::Step;

pub use report::{
    validate_plan, PlanReport, StructuralError, StructuralErrorKind, StructuralWarning,
    StructuralWarningKind,
};

/// A plan snapshot ready for graph queries.
#[derive(Debug, Clone)]
pub struct PlanAnalysis {
    /// Unique step numbers, ascending.
    pub roster: Vec<u32>,
    /// Unfiltered dependency lists as declared in each step's text.
    pub raw_deps: BTreeMap<u32, Vec<u32>>,
    /// The built graph.
    pub graph: DependencyGraph,
}

impl PlanAnalysis {
    /// Extract dependencies from every step and build the graph.
    ///
    /// When two files claim the same step number, the first one's text
    /// wins here; the duplicate itself is reported by [`validate_plan`].
    pub fn from_steps(steps: &[Step]) -> Self {
        let mut raw_deps: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for step in steps {
            raw_deps
                .entry(step.number)
                .or_insert_with(|| graph::extract_dependencies(&step.body));
        }
        let roster: Vec<u32> = raw_deps.keys().copied().collect();
        let graph = graph::build_graph(&roster, &raw_deps);
        Self {
            roster,
            raw_deps,
            graph,
        }
    }

    /// Dependency validation for this snapshot.
    pub fn validate(&self) -> DependencyValidation {
        graph::validate_dependencies(&self.roster, &self.raw_deps, &self.graph)
    }

    /// Execution order for this snapshot.
    pub fn execution_order(&self) -> ExecutionOrder {
        graph::execution_order(&self.roster, &self.graph)
    }

    /// Critical path for this snapshot.
    pub fn critical_path(&self) -> CriticalPath {
        graph::critical_path(&self.roster, &self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepStatus;

    fn step(number: u32, body: &str) -> Step {
        Step {
            number,
            title: format!("step {number}"),
            status: StepStatus::Pending,
            body: body.to_owned(),
            declared_number: Some(number),
            updated: None,
            path: None,
        }
    }

    #[test]
    fn from_steps_extracts_and_builds() {
        let steps = vec![
            step(1, "no deps"),
            step(2, "depends-on: 1"),
            step(3, "Requires: 1, 2"),
        ];
        let analysis = PlanAnalysis::from_steps(&steps);
        assert_eq!(analysis.roster, vec![1, 2, 3]);
        assert_eq!(analysis.raw_deps[&3], vec![1, 2]);
        assert_eq!(analysis.graph.dependencies[&3].depends_on, vec![1, 2]);
        assert_eq!(analysis.graph.roots, vec![1]);
        assert_eq!(analysis.execution_order().order, vec![1, 2, 3]);
        assert_eq!(analysis.critical_path().length, 3);
        assert!(analysis.validate().valid);
    }

    #[test]
    fn duplicate_numbers_keep_first_text() {
        let mut dup = step(2, "depends-on: 1");
        dup.title = "first".to_owned();
        let mut dup2 = step(2, "no declarations");
        dup2.title = "second".to_owned();
        let steps = vec![step(1, ""), dup, dup2];

        let analysis = PlanAnalysis::from_steps(&steps);
        assert_eq!(analysis.roster, vec![1, 2]);
        assert_eq!(analysis.raw_deps[&2], vec![1]);
    }

    #[test]
    fn empty_plan_is_a_clean_snapshot() {
        let analysis = PlanAnalysis::from_steps(&[]);
        assert!(analysis.roster.is_empty());
        assert!(analysis.graph.dependencies.is_empty());
        assert!(analysis.validate().valid);
        assert!(analysis.execution_order().order.is_empty());
        assert_eq!(analysis.critical_path().length, 0);
    }
}
