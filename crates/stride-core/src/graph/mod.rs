//! The dependency graph engine.
//!
//! Everything in this module is a pure function over in-memory snapshots:
//! extraction reads one step's text, the builder turns a roster plus raw
//! dependency lists into a [`DependencyGraph`], and the remaining modules
//! derive validation results, execution order, the critical path, and
//! step queries from that graph. No state is kept between calls.

pub mod build;
pub mod critical;
pub mod cycle;
pub mod extract;
pub mod order;
pub mod query;
pub mod types;
pub mod validate;

pub use build::build_graph;
pub use critical::critical_path;
pub use cycle::find_cycles;
pub use extract::extract_dependencies;
pub use order::execution_order;
pub use query::{blocked_steps, dependency_chain, ready_steps};
pub use types::{
    CriticalPath, DependencyError, DependencyErrorKind, DependencyGraph, DependencyValidation,
    DependencyWarning, DependencyWarningKind, ExecutionOrder, StepDependency,
};
pub use validate::validate_dependencies;
