//! Step file parsing: file name prefix, heading, and header lines.
//!
//! Parsing is deliberately lenient. A file either looks like a step file
//! (digit prefix, `.md` extension) or it is skipped; inside a step file,
//! anything that does not match a known header form is simply body text.
//! Nothing here returns an error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::StepStatus;

/// `NN-some-slug.md` — digit prefix, optional separator, slug.
static FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)[-_]?(.*)\.md$").expect("file name pattern"));

/// `# Step N: Title` (any heading level, case-insensitive).
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#{1,6}\s*step\s+(\d+)\s*[:.]?\s*(.*)$").expect("heading pattern"));

/// `status: <value>` header line.
static STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^status:\s*(\S+)\s*$").expect("status pattern"));

/// `updated: <ISO date>` header line.
static UPDATED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^updated:\s*(\S+)\s*$").expect("updated pattern"));

/// Fields recognized in a step file's content, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepHeader {
    /// Number from the first `# Step N:` heading, if any.
    pub declared_number: Option<u32>,
    /// Title from the first `# Step N:` heading, if any.
    pub title: Option<String>,
    /// Status from the first `status:` line (`pending` when absent or
    /// unrecognized).
    pub status: StepStatus,
    /// Date from the first `updated:` line, if it parses as an ISO date.
    pub updated: Option<NaiveDate>,
}

/// Extract the step number from a file name, or `None` if the file does
/// not look like a step file.
pub fn file_number(file_name: &str) -> Option<u32> {
    let caps = FILE_NAME_RE.captures(file_name)?;
    caps[1].parse().ok()
}

/// Derive a human-readable title from the file name slug
/// (`03-wire-up-parser.md` becomes `wire up parser`).
pub fn slug_title(file_name: &str) -> String {
    let Some(caps) = FILE_NAME_RE.captures(file_name) else {
        return String::new();
    };
    caps[2].replace(['-', '_'], " ").trim().to_owned()
}

/// Scan a step file's content for its heading and header lines.
///
/// Only the first match of each form counts. An unrecognized `status:`
/// value degrades to `pending` with a logged warning; an unparseable
/// `updated:` date is ignored.
pub fn parse_header(content: &str) -> StepHeader {
    let mut header = StepHeader {
        status: StepStatus::Pending,
        ..StepHeader::default()
    };
    let mut saw_status = false;
    let mut saw_updated = false;

    for line in content.lines() {
        if header.declared_number.is_none() {
            if let Some(caps) = HEADING_RE.captures(line) {
                header.declared_number = caps[1].parse().ok();
                let title = caps[2].trim();
                if !title.is_empty() {
                    header.title = Some(title.to_owned());
                }
                continue;
            }
        }
        if !saw_status {
            if let Some(caps) = STATUS_RE.captures(line) {
                saw_status = true;
                match caps[1].parse::<StepStatus>() {
                    Ok(status) => header.status = status,
                    Err(e) => {
                        tracing::warn!(value = %&caps[1], "unrecognized step status, treating as pending: {e}");
                    }
                }
                continue;
            }
        }
        if !saw_updated {
            if let Some(caps) = UPDATED_RE.captures(line) {
                saw_updated = true;
                match NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") {
                    Ok(date) => header.updated = Some(date),
                    Err(_) => {
                        tracing::warn!(value = %&caps[1], "ignoring unparseable updated date");
                    }
                }
            }
        }
    }

    header
}
