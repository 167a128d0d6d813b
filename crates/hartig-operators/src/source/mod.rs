//! Source operators: turn a document into mapping tuples.
//!
//! A source is generic over the query language used to address the
//! document. The iterator query picks context nodes; each attribute's
//! query is evaluated relative to one context node. Per node, the output
//! is the Cartesian product of the attribute matches, with the first
//! mapped attribute varying slowest.

pub mod json;

use std::collections::BTreeSet;

use hartig_core::tuple::MappingTuple;
use hartig_core::value::{Binding, Value};
use serde_json::Map;
use tracing::{debug, trace};

use crate::explain::ExplainNode;
use crate::traits::{OpError, Operator};

/// A query sub-language over some document type.
pub trait QueryLanguage {
    /// Reported as `operator_class` in explain_json.
    const CLASS: &'static str;

    type Document: Send + Sync;
    type Query: Send + Sync;

    fn compile(text: &str) -> Result<Self::Query, OpError>;

    /// Context nodes selected by `query`, in evaluation order.
    fn iterate<'d>(document: &'d Self::Document, query: &Self::Query) -> Vec<&'d Self::Document>;

    /// Values matched by `query` relative to `context`.
    fn extract(context: &Self::Document, query: &Self::Query) -> Vec<Value>;
}

struct AttributeMapping<Q> {
    attribute: String,
    text: String,
    query: Q,
}

pub struct SourceOperator<L: QueryLanguage> {
    document: L::Document,
    iterator_text: String,
    iterator: L::Query,
    mappings: Vec<AttributeMapping<L::Query>>,
}

impl<L: QueryLanguage> SourceOperator<L> {
    /// Compile all queries up front. A later mapping for an attribute name
    /// already seen replaces the earlier one in place.
    pub fn new<I, A, Q>(document: L::Document, iterator: &str, mappings: I) -> Result<Self, OpError>
    where
        I: IntoIterator<Item = (A, Q)>,
        A: Into<String>,
        Q: AsRef<str>,
    {
        let mut compiled: Vec<AttributeMapping<L::Query>> = Vec::new();
        for (attribute, text) in mappings {
            let attribute = attribute.into();
            let text = text.as_ref().to_string();
            let mapping = AttributeMapping {
                query: L::compile(&text)?,
                attribute,
                text,
            };
            match compiled.iter_mut().find(|m| m.attribute == mapping.attribute) {
                Some(slot) => *slot = mapping,
                None => compiled.push(mapping),
            }
        }
        Ok(Self {
            iterator: L::compile(iterator)?,
            iterator_text: iterator.to_string(),
            document,
            mappings: compiled,
        })
    }

    pub fn iterator(&self) -> &str {
        &self.iterator_text
    }

    /// `(attribute, query)` pairs in mapping order.
    pub fn mappings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mappings
            .iter()
            .map(|m| (m.attribute.as_str(), m.text.as_str()))
    }

    fn expand(&self, context: &L::Document, out: &mut Vec<MappingTuple>) {
        let columns: Vec<(&str, Vec<Value>)> = self
            .mappings
            .iter()
            .map(|m| (m.attribute.as_str(), L::extract(context, &m.query)))
            .filter(|(_, values)| !values.is_empty())
            .collect();

        let mut cursor = vec![0usize; columns.len()];
        loop {
            out.push(
                columns
                    .iter()
                    .zip(&cursor)
                    .map(|((attr, values), &i)| (*attr, Binding::Bound(values[i].clone())))
                    .collect(),
            );

            // Odometer: advance the last column first.
            let mut pos = columns.len();
            loop {
                if pos == 0 {
                    return;
                }
                pos -= 1;
                cursor[pos] += 1;
                if cursor[pos] < columns[pos].1.len() {
                    break;
                }
                cursor[pos] = 0;
            }
        }
    }
}

impl<L: QueryLanguage> Operator for SourceOperator<L> {
    fn name(&self) -> &'static str {
        "source"
    }

    fn attributes(&self) -> BTreeSet<String> {
        self.mappings.iter().map(|m| m.attribute.clone()).collect()
    }

    fn execute(&self) -> Result<Vec<MappingTuple>, OpError> {
        let contexts = L::iterate(&self.document, &self.iterator);
        trace!(
            op = self.name(),
            iterator = %self.iterator_text,
            contexts = contexts.len(),
            "iterate"
        );

        let mut out = Vec::new();
        for (node, context) in contexts.into_iter().enumerate() {
            let before = out.len();
            self.expand(context, &mut out);
            trace!(op = self.name(), node, tuples = out.len() - before, "expanded node");
        }
        debug!(
            op = self.name(),
            iterator = %self.iterator_text,
            tuples = out.len(),
            "done"
        );
        Ok(out)
    }

    fn explain_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Source(".to_string(),
            format!("  iterator: {}", self.iterator_text),
            "  mappings:".to_string(),
        ];
        for m in &self.mappings {
            lines.push(format!("    {}: {}", m.attribute, m.text));
        }
        lines.push(")".to_string());
        lines
    }

    fn explain_json(&self) -> ExplainNode {
        let mappings: Map<String, serde_json::Value> = self
            .mappings
            .iter()
            .map(|m| (m.attribute.clone(), m.text.clone().into()))
            .collect();
        ExplainNode::new("Source")
            .with_class(L::CLASS)
            .with_parameter("iterator", self.iterator_text.as_str())
            .with_parameter("attribute_mappings", mappings)
    }
}
