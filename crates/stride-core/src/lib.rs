//! stride-core: the step model, plan loading, and the dependency engine
//! behind the `stride` CLI.
//!
//! A plan is a directory of numbered markdown step files. This crate loads
//! those files into [`step::Step`] records, extracts the dependencies each
//! step declares in its text, and computes everything the CLI reports:
//! the dependency graph, validation errors, execution order, critical path,
//! and the ready/blocked/prerequisite queries.
//!
//! All graph computation is synchronous and pure: it takes an in-memory
//! snapshot of the plan and returns derived data. Nothing is cached between
//! calls; the graph is recomputed from the current step text on demand.

pub mod graph;
pub mod plan;
pub mod step;
