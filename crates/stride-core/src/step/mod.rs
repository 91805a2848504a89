//! The step model: a numbered unit of work within a plan.
//!
//! Steps are owned by the plan directory on disk; this module defines the
//! in-memory record and its status enum. Loading is handled by
//! [`source::DirectorySource`], file parsing by [`parse`].

pub mod parse;
pub mod source;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion status of a step, as recorded in its `status:` header line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

impl FromStr for StepStatus {
    type Err = StepStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(StepStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`StepStatus`] string.
#[derive(Debug, Clone)]
pub struct StepStatusParseError(pub String);

impl fmt::Display for StepStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid step status: {:?}", self.0)
    }
}

impl std::error::Error for StepStatusParseError {}

/// A single step of a plan.
///
/// `number` comes from the file name prefix and is the step's identity
/// everywhere in the dependency engine. `declared_number` is the number
/// written in the `# Step N:` heading, kept separately so the plan
/// validator can flag files whose heading disagrees with their name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Step number from the file name prefix (unique within a valid plan).
    pub number: u32,
    /// Human-readable title from the heading, or the file name slug.
    pub title: String,
    /// Recorded completion status (`pending` when absent).
    pub status: StepStatus,
    /// Full raw file content; the source of dependency declarations.
    pub body: String,
    /// Number written in the `# Step N:` heading, if any.
    pub declared_number: Option<u32>,
    /// Date of the `updated:` header line, if any.
    pub updated: Option<NaiveDate>,
    /// Source file path, when loaded from disk.
    pub path: Option<PathBuf>,
}
