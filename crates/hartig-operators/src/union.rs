//! Union: bag concatenation of child outputs in child order.

use std::collections::BTreeSet;

use hartig_core::tuple::MappingTuple;
use tracing::debug;

use crate::explain::{push_child, ExplainNode};
use crate::plan::Plan;
use crate::traits::{OpError, Operator};

pub struct UnionOperator {
    children: Vec<Plan>,
}

impl UnionOperator {
    pub fn new<I, P>(children: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Plan>,
    {
        Self {
            children: children.into_iter().map(Into::into).collect(),
        }
    }
}

impl Operator for UnionOperator {
    fn name(&self) -> &'static str {
        "union"
    }

    fn attributes(&self) -> BTreeSet<String> {
        self.children.iter().flat_map(|c| c.attributes()).collect()
    }

    fn execute(&self) -> Result<Vec<MappingTuple>, OpError> {
        let mut out = Vec::new();
        for child in &self.children {
            out.extend(child.execute()?);
        }
        debug!(
            op = self.name(),
            children = self.children.len(),
            tuples = out.len(),
            "done"
        );
        Ok(out)
    }

    fn explain_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Union(".to_string(),
            format!("  operators: {}", self.children.len()),
        ];
        let n = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            push_child(&mut lines, &format!("[{i}]"), child, i + 1 == n);
        }
        lines.push(")".to_string());
        lines
    }

    fn explain_json(&self) -> ExplainNode {
        ExplainNode::new("Union")
            .with_parameter("operator_count", self.children.len())
            .with_children(self.children.iter().map(Operator::explain_json).collect())
    }
}
