//! The `StepSource` trait -- where a plan's steps come from.
//!
//! The dependency engine is agnostic about step storage; it only needs the
//! loaded [`Step`] records. [`DirectorySource`] is the production source
//! (one markdown file per step in a plan directory); tests substitute
//! in-memory sources.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::join_all;

use super::parse;
use super::Step;

/// Supplier of a plan's step records.
///
/// Object-safe so callers can hold a `Box<dyn StepSource>` and swap the
/// storage backing without touching the engine.
#[async_trait]
pub trait StepSource: Send + Sync {
    /// Load every step of the plan, sorted by step number.
    ///
    /// Loading is lenient: files that do not look like step files are
    /// skipped, unreadable files are skipped with a warning, and a missing
    /// plan directory yields an empty plan. An error is returned only when
    /// the directory exists but cannot be listed at all.
    async fn load_steps(&self) -> Result<Vec<Step>>;
}

// Object safety check.
const _: () = {
    fn _assert_object_safe(_: &dyn StepSource) {}
};

/// Filesystem step source: a directory of `NN-slug.md` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl StepSource for DirectorySource {
    async fn load_steps(&self) -> Result<Vec<Step>> {
        if !self.root.exists() {
            tracing::debug!(dir = %self.root.display(), "plan directory does not exist, loading empty plan");
            return Ok(Vec::new());
        }

        let mut dir = tokio::fs::read_dir(&self.root)
            .await
            .with_context(|| format!("failed to list plan directory {}", self.root.display()))?;

        // Collect candidate step files first, then read them concurrently.
        let mut candidates: Vec<(u32, String, PathBuf)> = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .with_context(|| format!("failed to list plan directory {}", self.root.display()))?
        {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(number) = parse::file_number(name) else {
                continue;
            };
            candidates.push((number, name.to_owned(), path));
        }

        let reads = candidates.into_iter().map(|(number, name, path)| async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => Some(step_from_file(number, &name, content, path)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable step file");
                    None
                }
            }
        });

        let mut steps: Vec<Step> = join_all(reads).await.into_iter().flatten().collect();
        steps.sort_by_key(|s| s.number);
        Ok(steps)
    }
}

/// Build a [`Step`] from one file's name and content.
fn step_from_file(number: u32, file_name: &str, content: String, path: PathBuf) -> Step {
    let header = parse::parse_header(&content);
    let title = header
        .title
        .unwrap_or_else(|| parse::slug_title(file_name));
    Step {
        number,
        title,
        status: header.status,
        body: content,
        declared_number: header.declared_number,
        updated: header.updated,
        path: Some(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepStatus;

    fn write_step(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn loads_steps_sorted_by_number() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_step(tmp.path(), "02-second.md", "# Step 2: Second\n");
        write_step(tmp.path(), "01-first.md", "# Step 1: First\nstatus: completed\n");
        write_step(tmp.path(), "10-last.md", "# Step 10: Last\n");

        let steps = DirectorySource::new(tmp.path()).load_steps().await.unwrap();
        let numbers: Vec<u32> = steps.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
        assert_eq!(steps[0].status, StepStatus::Completed);
        assert_eq!(steps[0].title, "First");
    }

    #[tokio::test]
    async fn skips_files_without_number_prefix() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_step(tmp.path(), "README.md", "# Not a step\n");
        write_step(tmp.path(), "notes.txt", "scratch\n");
        write_step(tmp.path(), "03-real.md", "# Step 3: Real\n");

        let steps = DirectorySource::new(tmp.path()).load_steps().await.unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].number, 3);
    }

    #[tokio::test]
    async fn missing_directory_yields_empty_plan() {
        let tmp = tempfile::TempDir::new().unwrap();
        let gone = tmp.path().join("no-such-dir");
        let steps = DirectorySource::new(&gone).load_steps().await.unwrap();
        assert!(steps.is_empty());
    }

    #[tokio::test]
    async fn title_falls_back_to_file_slug() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_step(tmp.path(), "04-set-up-ci.md", "no heading here\n");

        let steps = DirectorySource::new(tmp.path()).load_steps().await.unwrap();
        assert_eq!(steps[0].title, "set up ci");
        assert_eq!(steps[0].declared_number, None);
    }
}
