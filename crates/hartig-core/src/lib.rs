#![forbid(unsafe_code)]
//! hartig-core: the data model shared by every other crate.
//!
//! - RDF terms (`Iri`, `Literal`, `BlankNode`) and raw scalars extracted from
//!   source documents, unified as `Value`.
//! - `Binding`, the explicit "value or error marker" slot stored in tuples.
//! - `MappingTuple`, an immutable attribute → binding map.
//! - Triples, engine configuration, and stable hashing helpers.
//!
//! Nothing in this crate performs I/O.

pub mod config;
pub mod error;
pub mod hash;
pub mod prelude;
pub mod term;
pub mod triple;
pub mod tuple;
pub mod value;

pub use error::{Error, Result};
