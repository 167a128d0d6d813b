//! Operator trait + common error type.
//!
//! Every operator answers three questions: which attributes its tuples may
//! carry (`attributes`), what its tuples are (`execute`), and how it is built
//! (`explain` / `explain_json`).

use std::collections::BTreeSet;

use hartig_core::tuple::MappingTuple;
use thiserror::Error;

use crate::explain::{indent_lines, ExplainNode};

#[derive(Debug, Error)]
pub enum OpError {
    /// Project found a tuple lacking some of the requested attributes.
    #[error(
        "project: attribute(s) [{}] not found in tuple with attributes [{}]",
        .attributes.join(", "),
        .available.join(", ")
    )]
    AttributeMissing {
        attributes: Vec<String>,
        available: Vec<String>,
    },

    /// EquiJoin inputs share attribute names.
    #[error("equijoin: attribute sets must be disjoint; shared: [{}]", .shared.join(", "))]
    IncompatibleSchema { shared: Vec<String> },

    /// EquiJoin got join-attribute lists of different lengths.
    #[error("equijoin: join attribute lists must have equal length (left: {left}, right: {right})")]
    MalformedJoinCondition { left: usize, right: usize },

    #[error("project: attribute set must not be empty")]
    EmptyProjection,

    /// An iterator or extraction query that does not parse as JSONPath.
    #[error("invalid JSONPath query {query:?}: {source}")]
    Query {
        query: String,
        #[source]
        source: serde_json_path::ParseError,
    },
}

/// Trait that all operators implement.
///
/// Invariants:
/// - `execute` is deterministic given the same inputs and never reorders
///   tuples implicitly.
/// - Operators are immutable once constructed; repeated calls recompute.
pub trait Operator: Send + Sync {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Attribute names tuples of this operator may carry.
    fn attributes(&self) -> BTreeSet<String>;

    /// Evaluate the whole subtree and return its tuples in order.
    fn execute(&self) -> Result<Vec<MappingTuple>, OpError>;

    /// Explain text for this subtree, one entry per line, unindented.
    fn explain_lines(&self) -> Vec<String>;

    /// Explain text with `prefix` and `indent` spaces before every line.
    fn explain(&self, indent: usize, prefix: &str) -> String {
        indent_lines(&self.explain_lines(), indent, prefix)
    }

    /// Structured, JSON-serializable explanation of this subtree.
    fn explain_json(&self) -> ExplainNode;
}
