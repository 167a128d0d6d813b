//! Extend: add (or overwrite) one attribute computed by an expression.

use std::collections::BTreeSet;

use hartig_core::tuple::MappingTuple;
use hartig_expr::Expression;
use tracing::debug;

use crate::explain::{push_child, ExplainNode};
use crate::plan::Plan;
use crate::traits::{OpError, Operator};

pub struct ExtendOperator {
    parent: Box<Plan>,
    attribute: String,
    expression: Expression,
}

impl ExtendOperator {
    pub fn new(parent: impl Into<Plan>, attribute: impl Into<String>, expression: Expression) -> Self {
        Self {
            parent: Box::new(parent.into()),
            attribute: attribute.into(),
            expression,
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }
}

impl Operator for ExtendOperator {
    fn name(&self) -> &'static str {
        "extend"
    }

    fn attributes(&self) -> BTreeSet<String> {
        let mut attrs = self.parent.attributes();
        attrs.insert(self.attribute.clone());
        attrs
    }

    fn execute(&self) -> Result<Vec<MappingTuple>, OpError> {
        let rows = self.parent.execute()?;
        let mut epsilons = 0usize;
        let out: Vec<MappingTuple> = rows
            .into_iter()
            .map(|t| {
                let binding = self.expression.evaluate(&t);
                if binding.is_epsilon() {
                    epsilons += 1;
                }
                t.with(self.attribute.as_str(), binding)
            })
            .collect();
        debug!(
            op = self.name(),
            attribute = %self.attribute,
            tuples = out.len(),
            epsilons,
            "done"
        );
        Ok(out)
    }

    fn explain_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Extend(".to_string(),
            format!("  attribute: {}", self.attribute),
            format!("  expression: {}", self.expression),
        ];
        push_child(&mut lines, "parent", self.parent.as_ref(), true);
        lines.push(")".to_string());
        lines
    }

    fn explain_json(&self) -> ExplainNode {
        ExplainNode::new("Extend")
            .with_parameter("new_attribute", self.attribute.as_str())
            .with_parameter("expression", self.expression.explain_json())
            .with_parent(self.parent.explain_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::json::JsonSourceOperator;
    use hartig_core::term::Iri;
    use hartig_core::value::Binding;
    use hartig_expr::Function;
    use serde_json::json;

    fn items() -> JsonSourceOperator {
        JsonSourceOperator::new(
            json!({"items": [{"id": "a"}, {"id": "b"}]}),
            "$.items[*]",
            [("id", "$.id")],
        )
        .unwrap()
    }

    #[test]
    fn adds_computed_attribute() {
        let ext = ExtendOperator::new(
            items(),
            "subject",
            Expression::call(
                Function::ToIri,
                vec![
                    Expression::reference("id"),
                    Expression::constant("http://example.org/"),
                ],
            ),
        );
        let rows = ext.execute().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1].get("subject"),
            Some(&Binding::bound(Iri::new("http://example.org/b")))
        );
        assert_eq!(rows[1].get("id"), Some(&Binding::bound("b")));
    }

    #[test]
    fn missing_reference_binds_epsilon() {
        let ext = ExtendOperator::new(items(), "x", Expression::reference("absent"));
        let rows = ext.execute().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|t| t.get("x") == Some(&Binding::Epsilon)));
    }

    #[test]
    fn existing_attribute_is_overwritten() {
        let ext = ExtendOperator::new(items(), "id", Expression::constant("z"));
        let rows = ext.execute().unwrap();
        assert!(rows.iter().all(|t| t.get("id") == Some(&Binding::bound("z"))));
        assert!(rows.iter().all(|t| t.len() == 1));
    }

    #[test]
    fn explain_nests_parent() {
        let ext = ExtendOperator::new(items(), "x", Expression::reference("id"));
        let text = ext.explain(0, "");
        assert!(text.starts_with("Extend(\n  attribute: x\n  expression: Ref(id)\n  └─ parent:\n      Source("));
        let j = ext.explain_json().to_value().unwrap();
        assert_eq!(j["type"], "Extend");
        assert_eq!(j["parameters"]["new_attribute"], "x");
        assert_eq!(j["parameters"]["expression"]["type"], "Reference");
        assert_eq!(j["parent"]["type"], "Source");
        assert_eq!(ext.attributes().into_iter().collect::<Vec<_>>(), vec!["id", "x"]);
    }
}
