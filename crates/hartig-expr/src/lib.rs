#![forbid(unsafe_code)]
//! hartig-expr: the expression language used by `Extend`.
//!
//! Evaluation never fails. A missing attribute, an unusable operand, or a
//! failed term construction yields `Binding::Epsilon`, and a function call
//! whose arguments contain epsilon short-circuits to epsilon without running.

pub mod expr;
pub mod functions;

pub use expr::Expression;
pub use functions::Function;
