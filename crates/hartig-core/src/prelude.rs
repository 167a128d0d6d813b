//! Convenient re-exports for downstream crates.

pub use crate::config::EngineConfig;
pub use crate::error::{Error, Result};
pub use crate::term::{xsd, BlankNode, Iri, Literal, Term};
pub use crate::triple::Triple;
pub use crate::tuple::MappingTuple;
pub use crate::value::{Binding, Scalar, Value};
