//! The merged plan report: file-level structural checks layered on top of
//! dependency validation.
//!
//! Structural checks look at the step files themselves -- numbering and
//! headings -- while the dependency half comes from the graph engine.
//! Like dependency defects, structural issues are data, never panics.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::graph::DependencyValidation;
use crate::step::Step;

use super::PlanAnalysis;

/// Kind of structural defect in the plan directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructuralErrorKind {
    /// Two files claim the same step number.
    DuplicateNumber,
    /// A file's `# Step N:` heading disagrees with its file name prefix.
    NumberMismatch,
}

impl fmt::Display for StructuralErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::DuplicateNumber => "duplicate-number",
            Self::NumberMismatch => "number-mismatch",
        };
        f.write_str(s)
    }
}

/// A structural defect tied to a step file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralError {
    pub kind: StructuralErrorKind,
    pub step_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Kind of structural advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructuralWarningKind {
    /// The numbering sequence skips one or more values.
    NumberGap,
    /// A step file has neither a heading title nor a usable file slug.
    MissingTitle,
}

impl fmt::Display for StructuralWarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NumberGap => "number-gap",
            Self::MissingTitle => "missing-title",
        };
        f.write_str(s)
    }
}

/// A structural advisory that does not invalidate the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralWarning {
    pub kind: StructuralWarningKind,
    pub step_number: u32,
    pub message: String,
}

/// The full plan report: structural findings merged with dependency
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReport {
    /// True when there are no structural errors and the dependency
    /// validation passed.
    pub valid: bool,
    pub structural_errors: Vec<StructuralError>,
    pub structural_warnings: Vec<StructuralWarning>,
    pub dependency: DependencyValidation,
}

/// Validate a loaded plan end to end.
///
/// Runs the structural checks over the step records, then the dependency
/// engine over the extracted declarations, and merges both into one
/// report.
pub fn validate_plan(steps: &[Step]) -> PlanReport {
    let mut structural_errors: Vec<StructuralError> = Vec::new();
    let mut structural_warnings: Vec<StructuralWarning> = Vec::new();

    // Duplicate numbers: every file after the first claiming a number is
    // an error against that number.
    let mut seen: Vec<u32> = Vec::new();
    for step in steps {
        if seen.contains(&step.number) {
            structural_errors.push(StructuralError {
                kind: StructuralErrorKind::DuplicateNumber,
                step_number: step.number,
                path: step.path.clone(),
                message: format!("step number {} is claimed by more than one file", step.number),
            });
        } else {
            seen.push(step.number);
        }
    }

    for step in steps {
        if let Some(declared) = step.declared_number {
            if declared != step.number {
                structural_errors.push(StructuralError {
                    kind: StructuralErrorKind::NumberMismatch,
                    step_number: step.number,
                    path: step.path.clone(),
                    message: format!(
                        "file is numbered {} but its heading says step {declared}",
                        step.number
                    ),
                });
            }
        }
        if step.title.is_empty() {
            structural_warnings.push(StructuralWarning {
                kind: StructuralWarningKind::MissingTitle,
                step_number: step.number,
                message: format!("step {} has no title", step.number),
            });
        }
    }

    // Gaps in the numbering sequence, pairwise over the sorted roster.
    seen.sort_unstable();
    for pair in seen.windows(2) {
        if pair[1] > pair[0] + 1 {
            structural_warnings.push(StructuralWarning {
                kind: StructuralWarningKind::NumberGap,
                step_number: pair[1],
                message: format!(
                    "step numbering jumps from {} to {}",
                    pair[0], pair[1]
                ),
            });
        }
    }

    let dependency = PlanAnalysis::from_steps(steps).validate();

    PlanReport {
        valid: structural_errors.is_empty() && dependency.valid,
        structural_errors,
        structural_warnings,
        dependency,
    }
}
