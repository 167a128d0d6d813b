#![forbid(unsafe_code)]
//! hartig: a mapping-relation algebra for building RDF graphs from
//! semi-structured documents.
//!
//! The workspace crates are re-exported here:
//! - [`hartig_core`]: terms, values, tuples, triples, config
//! - [`hartig_expr`]: expressions and built-in functions
//! - [`hartig_operators`]: Source, Extend, Union, Project, EquiJoin and explain
//! - [`hartig_planner`]: YAML pipeline descriptions

pub use hartig_core;
pub use hartig_expr;
pub use hartig_operators;
pub use hartig_planner;

pub use hartig_core::prelude::*;
pub use hartig_expr::{Expression, Function};
pub use hartig_operators::{
    EquiJoinOperator, ExplainNode, ExtendOperator, JsonSourceOperator, OpError, Operator, Plan,
    ProjectOperator, UnionOperator,
};
pub use hartig_planner::{parse_yaml_pipeline, parse_yaml_pipeline_with, Pipeline, PlanError};
