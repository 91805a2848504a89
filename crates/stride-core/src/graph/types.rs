//! Data types produced by the dependency engine.
//!
//! All of these are derived values, recomputed fresh on every call. Defects
//! found in a plan are returned as [`DependencyError`] values, never raised;
//! the caller decides whether an error is fatal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared dependency relationships of a single step.
///
/// `depends_on` holds the steps this step waits for; `blocked_by` is the
/// reverse direction: the steps that wait for this one. Both lists are
/// unique and sorted ascending, and contain only roster-valid references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDependency {
    pub step_number: u32,
    pub depends_on: Vec<u32>,
    pub blocked_by: Vec<u32>,
}

/// The full bidirectional dependency graph of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// One entry per roster step, keyed by step number.
    pub dependencies: BTreeMap<u32, StepDependency>,
    /// Steps with no dependencies of their own.
    pub roots: Vec<u32>,
    /// Steps nothing else depends on.
    pub leaves: Vec<u32>,
    /// Whether any circular chain exists.
    pub has_circular: bool,
    /// Deduplicated cycles, each rotated to start at its smallest member
    /// and closed by repeating that member.
    pub circular_chains: Vec<Vec<u32>>,
}

/// Kind of dependency defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyErrorKind {
    Circular,
    SelfReference,
    Duplicate,
    InvalidStep,
}

impl fmt::Display for DependencyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Circular => "circular",
            Self::SelfReference => "self-reference",
            Self::Duplicate => "duplicate",
            Self::InvalidStep => "invalid-step",
        };
        f.write_str(s)
    }
}

/// A dependency defect, returned as data.
///
/// Implements `std::error::Error` so callers that do treat a defect as
/// fatal can propagate it, but the engine itself never throws one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct DependencyError {
    pub kind: DependencyErrorKind,
    /// The step the defect is reported against.
    pub step_number: u32,
    /// Other steps involved (cycle members, the duplicated value, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_steps: Vec<u32>,
    pub message: String,
}

/// Kind of advisory finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyWarningKind {
    LongChain,
    Bottleneck,
}

impl fmt::Display for DependencyWarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LongChain => "long-chain",
            Self::Bottleneck => "bottleneck",
        };
        f.write_str(s)
    }
}

/// An advisory finding that does not invalidate the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyWarning {
    pub kind: DependencyWarningKind,
    pub step_number: u32,
    pub message: String,
}

/// Outcome of dependency validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyValidation {
    /// True when `errors` is empty; warnings do not affect validity.
    pub valid: bool,
    pub errors: Vec<DependencyError>,
    pub warnings: Vec<DependencyWarning>,
}

/// A dependency-respecting schedule for the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    /// Flat sequence in which steps can be executed one at a time.
    pub order: Vec<u32>,
    /// Groups of steps executable in parallel once all prior groups finish.
    pub levels: Vec<Vec<u32>>,
}

/// The longest chain of step-to-step dependencies in the plan.
///
/// Length counts steps, not durations; a plan with no dependencies has a
/// critical path of a single step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalPath {
    pub path: Vec<u32>,
    pub length: usize,
}
