#![forbid(unsafe_code)]
//! hartig-planner: YAML pipeline descriptions → operator trees.
//!
//! A description names its input documents, an optional `config` block, and
//! a single recursive `plan`. Lowering checks every structural precondition
//! the operators check (EquiJoin disjointness, Project non-emptiness, query
//! syntax) so a `Pipeline` that builds is ready to execute.
//!
//! Documents are supplied inline or by the caller; nothing here reads files.

pub mod dsl;
pub mod error;
pub mod pipeline;

pub use dsl::yaml::{parse_yaml_pipeline, parse_yaml_pipeline_with, PipelineConfig};
pub use error::PlanError;
pub use pipeline::Pipeline;
