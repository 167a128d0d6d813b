//! Project: keep exactly a fixed attribute set, strictly per tuple.

use std::collections::BTreeSet;

use hartig_core::tuple::MappingTuple;
use tracing::debug;

use crate::explain::{push_child, ExplainNode};
use crate::plan::Plan;
use crate::traits::{OpError, Operator};

pub struct ProjectOperator {
    parent: Box<Plan>,
    attributes: BTreeSet<String>,
}

impl ProjectOperator {
    pub fn new<I, S>(parent: impl Into<Plan>, attributes: I) -> Result<Self, OpError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes: BTreeSet<String> = attributes.into_iter().map(Into::into).collect();
        if attributes.is_empty() {
            return Err(OpError::EmptyProjection);
        }
        Ok(Self {
            parent: Box::new(parent.into()),
            attributes,
        })
    }

    fn project(&self, tuple: &MappingTuple) -> Result<MappingTuple, OpError> {
        let missing: Vec<String> = self
            .attributes
            .iter()
            .filter(|a| !tuple.contains(a))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(OpError::AttributeMissing {
                attributes: missing,
                available: tuple.attributes().map(str::to_string).collect(),
            });
        }
        Ok(tuple
            .iter()
            .filter(|(name, _)| self.attributes.contains(*name))
            .map(|(name, binding)| (name, binding.clone()))
            .collect())
    }
}

impl Operator for ProjectOperator {
    fn name(&self) -> &'static str {
        "project"
    }

    fn attributes(&self) -> BTreeSet<String> {
        self.attributes.clone()
    }

    fn execute(&self) -> Result<Vec<MappingTuple>, OpError> {
        let out = self
            .parent
            .execute()?
            .iter()
            .map(|t| self.project(t))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(op = self.name(), tuples = out.len(), "done");
        Ok(out)
    }

    fn explain_lines(&self) -> Vec<String> {
        let attrs: Vec<&str> = self.attributes.iter().map(String::as_str).collect();
        let mut lines = vec![
            "Project(".to_string(),
            format!("  attributes: [{}]", attrs.join(", ")),
        ];
        push_child(&mut lines, "parent", self.parent.as_ref(), true);
        lines.push(")".to_string());
        lines
    }

    fn explain_json(&self) -> ExplainNode {
        let attrs: Vec<&str> = self.attributes.iter().map(String::as_str).collect();
        ExplainNode::new("Project")
            .with_parameter("attributes", attrs)
            .with_parent(self.parent.explain_json())
    }
}
