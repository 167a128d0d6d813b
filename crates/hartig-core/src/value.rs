//! Values carried by tuples.
//!
//! A `Value` is either a raw `Scalar` lifted out of a source document or an
//! RDF `Term` built by an expression. `Binding` wraps a value together with the
//! error marker so that failed evaluations travel through the data instead of
//! aborting the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::term::{BlankNode, Iri, Literal, Term};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
    /// Arrays and objects matched as a whole by an extraction query.
    Nested(serde_json::Value),
}

impl Scalar {
    /// Stable type name used in explain output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "boolean",
            Scalar::I64(_) => "integer",
            Scalar::F64(_) => "float",
            Scalar::Str(_) => "string",
            Scalar::Nested(_) => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Scalar(Scalar),
    Term(Term),
}

impl Value {
    pub fn null() -> Self {
        Value::Scalar(Scalar::Null)
    }

    /// Lift a JSON node into a value. Numbers that fit in `i64` stay integral.
    pub fn from_json(node: &serde_json::Value) -> Self {
        use serde_json::Value as J;
        let scalar = match node {
            J::Null => Scalar::Null,
            J::Bool(b) => Scalar::Bool(*b),
            J::Number(n) => match n.as_i64() {
                Some(i) => Scalar::I64(i),
                None => Scalar::F64(n.as_f64().unwrap_or(f64::NAN)),
            },
            J::String(s) => Scalar::Str(s.clone()),
            J::Array(_) | J::Object(_) => Scalar::Nested(node.clone()),
        };
        Value::Scalar(scalar)
    }

    /// Plain JSON rendering: scalars as themselves, terms as their lexical
    /// value. Kind information is reported separately via `type_name`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as J;
        match self {
            Value::Scalar(Scalar::Null) => J::Null,
            Value::Scalar(Scalar::Bool(b)) => J::Bool(*b),
            Value::Scalar(Scalar::I64(i)) => J::from(*i),
            Value::Scalar(Scalar::F64(f)) => serde_json::Number::from_f64(*f)
                .map(J::Number)
                .unwrap_or(J::Null),
            Value::Scalar(Scalar::Str(s)) => J::String(s.clone()),
            Value::Scalar(Scalar::Nested(v)) => v.clone(),
            Value::Term(Term::Iri(iri)) => J::String(iri.as_str().to_string()),
            Value::Term(Term::Literal(lit)) => J::String(lit.lexical_form().to_string()),
            Value::Term(Term::BlankNode(b)) => J::String(b.id().to_string()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(s) => s.type_name(),
            Value::Term(t) => t.kind(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Value::Term(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::Null))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(Scalar::Null) => write!(f, "null"),
            Value::Scalar(Scalar::Bool(b)) => write!(f, "{b}"),
            Value::Scalar(Scalar::I64(i)) => write!(f, "{i}"),
            Value::Scalar(Scalar::F64(x)) => write!(f, "{x}"),
            Value::Scalar(Scalar::Str(s)) => write!(f, "{s:?}"),
            Value::Scalar(Scalar::Nested(v)) => write!(f, "{v}"),
            Value::Term(t) => write!(f, "{t}"),
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<Term> for Value {
    fn from(value: Term) -> Self {
        Value::Term(value)
    }
}

impl From<Iri> for Value {
    fn from(value: Iri) -> Self {
        Value::Term(Term::Iri(value))
    }
}

impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        Value::Term(Term::Literal(value))
    }
}

impl From<BlankNode> for Value {
    fn from(value: BlankNode) -> Self {
        Value::Term(Term::BlankNode(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::Str(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::Str(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(Scalar::I64(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(Scalar::I64(i64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(Scalar::F64(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::Bool(value))
    }
}

/// A tuple slot: a bound value or the error marker (epsilon).
///
/// Absence is not represented here; an absent attribute simply has no entry
/// in the tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Binding {
    Bound(Value),
    Epsilon,
}

impl Binding {
    pub fn bound(value: impl Into<Value>) -> Self {
        Binding::Bound(value.into())
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Binding::Epsilon)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Binding::Bound(v) => Some(v),
            Binding::Epsilon => None,
        }
    }
}

impl From<Value> for Binding {
    fn from(value: Value) -> Self {
        Binding::Bound(value)
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Bound(v) => v.fmt(f),
            Binding::Epsilon => write!(f, "ε"),
        }
    }
}
