//! Built-in functions: IRI, literal and blank node construction plus string
//! concatenation.
//!
//! All built-ins are total. Anything that cannot be converted produces
//! `Binding::Epsilon`.

use std::fmt;

use hartig_core::term::{has_scheme, BlankNode, Iri, Literal, Term};
use hartig_core::value::{Binding, Scalar, Value};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    ToIri,
    ToLiteral,
    ToBnode,
    Concat,
}

impl Function {
    pub fn name(&self) -> &'static str {
        match self {
            Function::ToIri => "to_iri",
            Function::ToLiteral => "to_literal",
            Function::ToBnode => "to_bnode",
            Function::Concat => "concat",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "to_iri" => Some(Function::ToIri),
            "to_literal" => Some(Function::ToLiteral),
            "to_bnode" => Some(Function::ToBnode),
            "concat" => Some(Function::Concat),
            _ => None,
        }
    }

    /// Apply to already-evaluated arguments. A wrong argument count is
    /// treated like any other unusable input.
    pub fn apply(&self, args: &[Value]) -> Binding {
        match (self, args) {
            (Function::ToIri, [value]) => to_iri(value, None),
            (Function::ToIri, [value, base]) => to_iri(value, Some(base)),
            (Function::ToLiteral, [value, datatype]) => to_literal(value, datatype),
            (Function::ToBnode, [value]) => to_bnode(value),
            (Function::Concat, values) => concat(values),
            _ => Binding::Epsilon,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lexical form of a value, if it has one usable as string content.
fn lexical(value: &Value) -> Option<String> {
    match value {
        Value::Scalar(Scalar::Str(s)) => Some(s.clone()),
        Value::Scalar(Scalar::I64(i)) => Some(i.to_string()),
        Value::Scalar(Scalar::F64(f)) => Some(f.to_string()),
        Value::Scalar(Scalar::Bool(b)) => Some(b.to_string()),
        Value::Term(Term::Literal(lit)) => Some(lit.lexical_form().to_string()),
        Value::Scalar(Scalar::Null | Scalar::Nested(_)) => None,
        Value::Term(Term::Iri(_) | Term::BlankNode(_)) => None,
    }
}

/// A string-ish value naming an IRI: a string, a string literal, or an IRI.
fn iri_text(value: &Value) -> Option<String> {
    match value {
        Value::Term(Term::Iri(iri)) => Some(iri.as_str().to_string()),
        Value::Term(Term::Literal(lit)) if lit.is_string() => {
            Some(lit.lexical_form().to_string())
        }
        Value::Scalar(Scalar::Str(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Build an IRI. Absolute inputs are kept verbatim; relative ones are
/// resolved against `base` and fail without it.
pub fn to_iri(value: &Value, base: Option<&Value>) -> Binding {
    if let Value::Term(Term::Iri(iri)) = value {
        return Binding::bound(iri.clone());
    }
    let Some(lex) = lexical(value) else {
        return Binding::Epsilon;
    };

    if has_scheme(&lex) {
        return match Iri::parse(lex) {
            Ok(iri) => Binding::bound(iri),
            Err(_) => Binding::Epsilon,
        };
    }

    let Some(base) = base.and_then(iri_text) else {
        return Binding::Epsilon;
    };
    match Url::parse(&base).and_then(|b| b.join(&lex)) {
        Ok(resolved) => Binding::bound(Iri::new(resolved.as_str())),
        Err(_) => Binding::Epsilon,
    }
}

/// Build a typed literal. IRIs contribute their string; blank nodes, null
/// and nested JSON have no lexical form.
pub fn to_literal(value: &Value, datatype: &Value) -> Binding {
    let Some(datatype) = iri_text(datatype).and_then(|dt| Iri::parse(dt).ok()) else {
        return Binding::Epsilon;
    };
    let lex = match value {
        Value::Term(Term::Iri(iri)) => Some(iri.as_str().to_string()),
        other => lexical(other),
    };
    match lex {
        Some(lex) => Binding::bound(Literal::new(lex, datatype)),
        None => Binding::Epsilon,
    }
}

/// Build a blank node whose label is derived from the value's lexical form.
pub fn to_bnode(value: &Value) -> Binding {
    let Some(lex) = lexical(value) else {
        return Binding::Epsilon;
    };
    if lex.is_empty() {
        return Binding::Epsilon;
    }
    let label: String = lex
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    Binding::bound(BlankNode::new(label))
}

/// Concatenate lexical forms into an `xsd:string` literal.
pub fn concat(values: &[Value]) -> Binding {
    let mut out = String::new();
    for value in values {
        match lexical(value) {
            Some(lex) => out.push_str(&lex),
            None => return Binding::Epsilon,
        }
    }
    Binding::bound(Literal::simple(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hartig_core::term::xsd;

    fn iri(b: Binding) -> String {
        match b {
            Binding::Bound(Value::Term(Term::Iri(iri))) => iri.into_string(),
            other => panic!("expected IRI, got {other:?}"),
        }
    }

    fn literal(b: Binding) -> Literal {
        match b {
            Binding::Bound(Value::Term(Term::Literal(lit))) => lit,
            other => panic!("expected literal, got {other:?}"),
        }
    }

    #[test]
    fn to_iri_keeps_absolute_iris() {
        let out = to_iri(&Value::from("http://example.org/resource"), None);
        assert_eq!(iri(out), "http://example.org/resource");
    }

    #[test]
    fn to_iri_resolves_against_base() {
        let base = Value::from("http://example.org/");
        assert_eq!(
            iri(to_iri(&Value::from("resource123"), Some(&base))),
            "http://example.org/resource123"
        );
        let base = Value::from("http://example.org/item/");
        assert_eq!(
            iri(to_iri(&Value::from(42), Some(&base))),
            "http://example.org/item/42"
        );
    }

    #[test]
    fn to_iri_accepts_string_literals_and_iri_bases() {
        let lit = Value::from(Literal::simple("http://example.org/item"));
        assert_eq!(iri(to_iri(&lit, None)), "http://example.org/item");

        let base = Value::from(Iri::new("http://example.org/p/"));
        assert_eq!(
            iri(to_iri(&Value::from("x"), Some(&base))),
            "http://example.org/p/x"
        );
    }

    #[test]
    fn to_iri_failures_are_epsilon() {
        assert!(to_iri(&Value::from("relative"), None).is_epsilon());
        assert!(to_iri(&Value::null(), None).is_epsilon());
        assert!(to_iri(&Value::from("http://bad iri"), None).is_epsilon());
        assert!(to_iri(&Value::from(BlankNode::new("b")), None).is_epsilon());
        let bad_base = Value::from("not a base");
        assert!(to_iri(&Value::from("x"), Some(&bad_base)).is_epsilon());
    }

    #[test]
    fn to_literal_uses_lexical_forms() {
        let lit = literal(to_literal(&Value::from(42), &Value::from(xsd::INTEGER)));
        assert_eq!(lit.lexical_form(), "42");
        assert_eq!(lit.datatype().as_str(), xsd::INTEGER);

        let original = Value::from(Literal::simple("123"));
        let lit = literal(to_literal(&original, &Value::from(xsd::INTEGER)));
        assert_eq!(lit.lexical_form(), "123");

        let lit = literal(to_literal(
            &Value::from(Iri::new("http://ex/a")),
            &Value::from(xsd::STRING),
        ));
        assert_eq!(lit.lexical_form(), "http://ex/a");
    }

    #[test]
    fn to_literal_failures_are_epsilon() {
        assert!(to_literal(&Value::null(), &Value::from(xsd::STRING)).is_epsilon());
        assert!(to_literal(&Value::from("x"), &Value::from("not-an-iri")).is_epsilon());
    }

    #[test]
    fn concat_joins_lexical_forms() {
        let out = literal(concat(&[Value::from("Hello"), Value::from(" "), Value::from("World")]));
        assert_eq!(out.lexical_form(), "Hello World");
        assert!(out.is_string());

        let out = literal(concat(&[
            Value::from(Literal::simple("Alice")),
            Value::from(" Smith"),
        ]));
        assert_eq!(out.lexical_form(), "Alice Smith");

        assert_eq!(literal(concat(&[Value::from("Hello"), Value::from("")])).lexical_form(), "Hello");
    }

    #[test]
    fn concat_rejects_non_lexical_operands() {
        assert!(concat(&[Value::from("Hello"), Value::null()]).is_epsilon());
        assert!(concat(&[Value::from(Iri::new("http://x/"))]).is_epsilon());
    }

    #[test]
    fn to_bnode_sanitizes_labels() {
        match to_bnode(&Value::from("John Doe")) {
            Binding::Bound(Value::Term(Term::BlankNode(b))) => assert_eq!(b.id(), "John_Doe"),
            other => panic!("expected blank node, got {other:?}"),
        }
        assert!(to_bnode(&Value::from("")).is_epsilon());
        assert!(to_bnode(&Value::null()).is_epsilon());
    }

    #[test]
    fn apply_checks_arity() {
        assert!(Function::ToLiteral.apply(&[Value::from("x")]).is_epsilon());
        assert!(Function::ToBnode.apply(&[]).is_epsilon());
        assert!(Function::ToIri
            .apply(&[Value::from("a"), Value::from("http://b/"), Value::from("c")])
            .is_epsilon());
        assert_eq!(Function::from_name("concat"), Some(Function::Concat));
        assert_eq!(Function::from_name("nope"), None);
    }
}
