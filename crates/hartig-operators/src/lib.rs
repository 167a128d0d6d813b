#![forbid(unsafe_code)]
//! hartig-operators: the mapping-relation operators.
//!
//! Design intent:
//! - Pure and synchronous. `execute()` materializes its whole result and
//!   recomputes from scratch on every call.
//! - Operators own their inputs. A tree is built bottom-up and never mutated.
//! - Two error channels: data-level failures are `Binding::Epsilon` inside
//!   tuples; structural violations are `OpError` values returned to the caller.

pub mod explain;
pub mod plan;
pub mod traits;

pub mod extend;
pub mod join;
pub mod project;
pub mod source;
pub mod union;

pub use explain::ExplainNode;
pub use extend::ExtendOperator;
pub use join::{EquiJoinOperator, JoinCondition};
pub use plan::Plan;
pub use project::ProjectOperator;
pub use source::json::{JsonPathLanguage, JsonSourceOperator};
pub use source::{QueryLanguage, SourceOperator};
pub use traits::{OpError, Operator};
pub use union::UnionOperator;
