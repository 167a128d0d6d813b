//! Expression tree: constants, attribute references, and function calls.

use std::fmt;

use hartig_core::term::Term;
use hartig_core::tuple::MappingTuple;
use hartig_core::value::{Binding, Scalar, Value};
use serde_json::json;

use crate::functions::Function;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(Value),
    Reference(String),
    FunctionCall {
        function: Function,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    pub fn constant(value: impl Into<Value>) -> Self {
        Expression::Constant(value.into())
    }

    pub fn reference(attribute: impl Into<String>) -> Self {
        Expression::Reference(attribute.into())
    }

    pub fn call(function: Function, arguments: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            function,
            arguments,
        }
    }

    /// Evaluate against one tuple.
    ///
    /// Arguments are evaluated left to right and evaluation stops at the
    /// first epsilon; the function is not invoked in that case.
    pub fn evaluate(&self, tuple: &MappingTuple) -> Binding {
        match self {
            Expression::Constant(value) => Binding::Bound(value.clone()),
            Expression::Reference(attribute) => {
                tuple.get(attribute).cloned().unwrap_or(Binding::Epsilon)
            }
            Expression::FunctionCall {
                function,
                arguments,
            } => {
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    match argument.evaluate(tuple) {
                        Binding::Bound(value) => values.push(value),
                        Binding::Epsilon => return Binding::Epsilon,
                    }
                }
                function.apply(&values)
            }
        }
    }

    /// Structured description consumed by `explain_json`.
    pub fn explain_json(&self) -> serde_json::Value {
        match self {
            Expression::Constant(value) => {
                let mut node = json!({
                    "type": "Constant",
                    "value": value.to_json(),
                    "value_type": value.type_name(),
                });
                if let Value::Term(Term::Literal(lit)) = value {
                    node["datatype"] = json!(lit.datatype().as_str());
                    if let Some(lang) = lit.language() {
                        node["language"] = json!(lang);
                    }
                }
                node
            }
            Expression::Reference(attribute) => json!({
                "type": "Reference",
                "attribute": attribute,
            }),
            Expression::FunctionCall {
                function,
                arguments,
            } => json!({
                "type": "FunctionCall",
                "function": function.name(),
                "arguments": arguments.iter().map(Expression::explain_json).collect::<Vec<_>>(),
            }),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(Value::Scalar(Scalar::Str(s))) => write!(f, "Const('{s}')"),
            Expression::Constant(value) => write!(f, "Const({value})"),
            Expression::Reference(attribute) => write!(f, "Ref({attribute})"),
            Expression::FunctionCall {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hartig_core::term::{Iri, Literal};

    fn sample() -> MappingTuple {
        MappingTuple::new()
            .with("id", Binding::bound("123"))
            .with("name", Binding::bound("Alice"))
            .with("age", Binding::bound(30))
            .with("department", Binding::bound("Engineering"))
    }

    #[test]
    fn constant_ignores_tuple() {
        let c = Expression::constant("FixedValue");
        assert_eq!(c.evaluate(&sample()), Binding::bound("FixedValue"));
        assert_eq!(c.evaluate(&MappingTuple::new()), Binding::bound("FixedValue"));
    }

    #[test]
    fn reference_reads_or_degrades() {
        assert_eq!(
            Expression::reference("age").evaluate(&sample()),
            Binding::bound(30)
        );
        assert_eq!(
            Expression::reference("missing").evaluate(&sample()),
            Binding::Epsilon
        );
    }

    #[test]
    fn reference_forwards_stored_epsilon() {
        let t = MappingTuple::new().with("bad", Binding::Epsilon);
        assert!(Expression::reference("bad").evaluate(&t).is_epsilon());
    }

    #[test]
    fn function_call_with_references() {
        let e = Expression::call(
            Function::ToIri,
            vec![
                Expression::reference("id"),
                Expression::constant("http://example.org/person/"),
            ],
        );
        assert_eq!(
            e.evaluate(&sample()),
            Binding::bound(Iri::new("http://example.org/person/123"))
        );
    }

    #[test]
    fn nested_calls_compose() {
        let e = Expression::call(
            Function::Concat,
            vec![
                Expression::constant("Name: "),
                Expression::reference("name"),
                Expression::call(
                    Function::Concat,
                    vec![
                        Expression::constant(" ("),
                        Expression::reference("department"),
                        Expression::constant(")"),
                    ],
                ),
            ],
        );
        assert_eq!(
            e.evaluate(&sample()),
            Binding::bound(Literal::simple("Name: Alice (Engineering)"))
        );
    }

    #[test]
    fn epsilon_argument_short_circuits() {
        let e = Expression::call(
            Function::Concat,
            vec![Expression::constant("x"), Expression::reference("missing")],
        );
        assert!(e.evaluate(&sample()).is_epsilon());
    }

    #[test]
    fn display_forms() {
        let e = Expression::call(
            Function::ToIri,
            vec![
                Expression::reference("id"),
                Expression::constant("http://example.org/"),
            ],
        );
        assert_eq!(e.to_string(), "to_iri(Ref(id), Const('http://example.org/'))");
        assert_eq!(
            Expression::constant(Iri::new("http://x/")).to_string(),
            "Const(<http://x/>)"
        );
        assert_eq!(Expression::constant(42).to_string(), "Const(42)");
    }

    #[test]
    fn explain_json_shapes() {
        let e = Expression::call(
            Function::ToIri,
            vec![
                Expression::reference("item_id"),
                Expression::constant("http://example.org/"),
            ],
        );
        let j = e.explain_json();
        assert_eq!(j["type"], "FunctionCall");
        assert_eq!(j["function"], "to_iri");
        assert_eq!(j["arguments"][0]["type"], "Reference");
        assert_eq!(j["arguments"][0]["attribute"], "item_id");
        assert_eq!(j["arguments"][1]["value"], "http://example.org/");
        assert_eq!(j["arguments"][1]["value_type"], "string");

        let j = Expression::constant(Iri::new("http://xmlns.com/foaf/0.1/Person")).explain_json();
        assert_eq!(j["value_type"], "IRI");
        assert_eq!(j["value"], "http://xmlns.com/foaf/0.1/Person");

        let j = Expression::constant(Literal::lang("chat", "fr")).explain_json();
        assert_eq!(j["value_type"], "Literal");
        assert_eq!(j["language"], "fr");
    }
}
