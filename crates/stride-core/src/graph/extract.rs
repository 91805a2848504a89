//! Dependency extraction from a step's raw text.
//!
//! Four declaration syntaxes are recognized, each by its own matcher over
//! the immutable text, and their candidates are unioned at the end:
//!
//! 1. a `depends-on:` header line with a comma/space-separated number list,
//! 2. a "Dependencies" section whose bullet lines name `Step N` or bare
//!    numerals (the section ends at the next heading),
//! 3. inline `(depends on Step X, Y)` markers anywhere in the body,
//! 4. `Requires:` lines, with or without a `Step` label on each number.
//!
//! Extraction is intentionally permissive: malformed declarations are
//! silently ignored, and self-referential or unknown step numbers are
//! captured as-is. The validator is the enforcement point.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^depends-on:\s*(.+)$").expect("header pattern"));

static SECTION_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#{1,6}\s*dependencies\b").expect("section heading pattern"));

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*+]\s+(.+)$").expect("bullet pattern"));

static INLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(\s*depends\s+on\s+([^)]*)\)").expect("inline pattern"));

static REQUIRES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*requires:\s*(.+)$").expect("requires pattern"));

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("number pattern"));

/// Extract every step number the given text declares a dependency on,
/// deduplicated and sorted ascending.
///
/// Never fails; text with no recognizable declarations yields an empty
/// list. No dependency is ever inferred from step ordering.
pub fn extract_dependencies(text: &str) -> Vec<u32> {
    let mut refs: BTreeSet<u32> = BTreeSet::new();
    header_declarations(text, &mut refs);
    section_bullets(text, &mut refs);
    inline_markers(text, &mut refs);
    requires_lines(text, &mut refs);
    refs.into_iter().collect()
}

/// Collect all numerals from a fragment of declaration text.
///
/// Tokens that do not fit a `u32` are ignored rather than reported,
/// consistent with the lenient-parse contract.
fn collect_numbers(fragment: &str, refs: &mut BTreeSet<u32>) {
    for m in NUMBER_RE.find_iter(fragment) {
        if let Ok(n) = m.as_str().parse::<u32>() {
            refs.insert(n);
        }
    }
}

/// Syntax 1: `depends-on: 1, 2 3` header lines.
fn header_declarations(text: &str, refs: &mut BTreeSet<u32>) {
    for line in text.lines() {
        if let Some(caps) = HEADER_RE.captures(line) {
            collect_numbers(&caps[1], refs);
        }
    }
}

/// Syntax 2: bullet lines inside a "Dependencies" section.
///
/// The section starts at a heading containing "Dependencies" and ends at
/// the next heading of any level.
fn section_bullets(text: &str, refs: &mut BTreeSet<u32>) {
    let mut in_section = false;
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            in_section = SECTION_HEADING_RE.is_match(trimmed);
            continue;
        }
        if in_section {
            if let Some(caps) = BULLET_RE.captures(line) {
                collect_numbers(&caps[1], refs);
            }
        }
    }
}

/// Syntax 3: `(depends on Step 3, 4)` markers anywhere in the body.
fn inline_markers(text: &str, refs: &mut BTreeSet<u32>) {
    for caps in INLINE_RE.captures_iter(text) {
        collect_numbers(&caps[1], refs);
    }
}

/// Syntax 4: `Requires: ...` lines; every number on the line counts.
fn requires_lines(text: &str, refs: &mut BTreeSet<u32>) {
    for line in text.lines() {
        if let Some(caps) = REQUIRES_RE.captures(line) {
            collect_numbers(&caps[1], refs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_line_with_commas_and_spaces() {
        assert_eq!(extract_dependencies("depends-on: 1, 2 5\nbody\n"), vec![1, 2, 5]);
    }

    #[test]
    fn dependencies_section_bullets() {
        let text = "\
# Step 4: Integrate

## Dependencies

- Step 2
- 3
* Step 1 and 5

## Approach

- Step 9 is mentioned here but outside the section
";
        assert_eq!(extract_dependencies(text), vec![1, 2, 3, 5]);
    }

    #[test]
    fn section_ends_at_next_heading() {
        let text = "\
## Dependencies
- Step 2
### Notes
- Step 7
";
        assert_eq!(extract_dependencies(text), vec![2]);
    }

    #[test]
    fn inline_marker_single_and_list() {
        assert_eq!(
            extract_dependencies("Do the thing (depends on Step 3)."),
            vec![3]
        );
        assert_eq!(
            extract_dependencies("Do the thing (depends on Step 3, 4, 11)."),
            vec![3, 4, 11]
        );
    }

    #[test]
    fn requires_line_with_and_without_labels() {
        assert_eq!(extract_dependencies("Requires: 4, 5"), vec![4, 5]);
        assert_eq!(extract_dependencies("  requires: Step 2 and Step 6"), vec![2, 6]);
    }

    #[test]
    fn all_four_syntaxes_union() {
        let text = "\
depends-on: 1

## Dependencies
- Step 2

Some work (depends on Step 3).

Requires: 4, 5
";
        assert_eq!(extract_dependencies(text), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn duplicates_across_syntaxes_collapse() {
        let text = "\
depends-on: 2
Requires: 2
(depends on Step 2)
";
        assert_eq!(extract_dependencies(text), vec![2]);
    }

    #[test]
    fn empty_and_unrelated_text_yield_nothing() {
        assert!(extract_dependencies("").is_empty());
        assert!(extract_dependencies("nothing declared here, not even one").is_empty());
    }

    #[test]
    fn self_reference_is_captured_not_filtered() {
        // Filtering is the validator's job; extraction reports what the
        // text says.
        assert_eq!(extract_dependencies("depends-on: 3"), vec![3]);
    }

    #[test]
    fn malformed_declarations_are_ignored() {
        assert!(extract_dependencies("depends-on: soon").is_empty());
        assert!(extract_dependencies("(depends on the weather)").is_empty());
    }

    #[test]
    fn oversized_numbers_are_ignored() {
        assert!(extract_dependencies("Requires: 99999999999999999999").is_empty());
    }

    #[test]
    fn no_dependency_inferred_from_ordering() {
        // A step that mentions numbers outside any declaration form
        // declares nothing.
        assert!(extract_dependencies("# Step 7: Ship v2 of the API").is_empty());
    }
}
