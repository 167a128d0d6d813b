//! RDF triples assembled from tuples at the end of a pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::term::{Iri, Term};
use crate::tuple::MappingTuple;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    /// Read subject/predicate/object from three attributes of `tuple`.
    ///
    /// Returns `None` when a position is absent, epsilon, a raw scalar, or a
    /// term that cannot stand there (literal subject, non-IRI predicate).
    pub fn from_tuple(tuple: &MappingTuple, s: &str, p: &str, o: &str) -> Option<Triple> {
        let subject = tuple.value(s)?.as_term()?;
        if subject.as_literal().is_some() {
            return None;
        }
        let predicate = tuple.value(p)?.as_term()?.as_iri()?.clone();
        let object = tuple.value(o)?.as_term()?.clone();
        Some(Triple {
            subject: subject.clone(),
            predicate,
            object,
        })
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{BlankNode, Literal};
    use crate::value::Binding;

    fn tuple(s: Binding, p: Binding, o: Binding) -> MappingTuple {
        MappingTuple::new().with("s", s).with("p", p).with("o", o)
    }

    #[test]
    fn builds_ntriples_line() {
        let t = tuple(
            Binding::bound(Iri::new("http://ex/alice")),
            Binding::bound(Iri::new("http://xmlns.com/foaf/0.1/name")),
            Binding::bound(Literal::simple("Alice")),
        );
        let triple = Triple::from_tuple(&t, "s", "p", "o").expect("triple");
        assert_eq!(
            triple.to_string(),
            "<http://ex/alice> <http://xmlns.com/foaf/0.1/name> \"Alice\" ."
        );
    }

    #[test]
    fn blank_subject_is_allowed() {
        let t = tuple(
            Binding::bound(BlankNode::new("b1")),
            Binding::bound(Iri::new("http://ex/p")),
            Binding::bound(Iri::new("http://ex/o")),
        );
        assert!(Triple::from_tuple(&t, "s", "p", "o").is_some());
    }

    #[test]
    fn rejects_epsilon_scalars_and_bad_positions() {
        let iri = || Binding::bound(Iri::new("http://ex/x"));
        assert!(Triple::from_tuple(&tuple(Binding::Epsilon, iri(), iri()), "s", "p", "o").is_none());
        assert!(Triple::from_tuple(&tuple(Binding::bound("raw"), iri(), iri()), "s", "p", "o").is_none());
        assert!(Triple::from_tuple(
            &tuple(Binding::bound(Literal::simple("lit")), iri(), iri()),
            "s",
            "p",
            "o"
        )
        .is_none());
        assert!(Triple::from_tuple(&tuple(iri(), iri(), iri()), "s", "p", "missing").is_none());
    }
}
