//! Nested-loop equi-join.
//!
//! Preconditions are checked at construction: the two sides expose disjoint
//! attribute sets, and the left and right join-attribute lists have equal
//! length. Execution materializes both sides and emits merged tuples in
//! (outer, inner) row-major order.
//!
//! Key comparison is on the raw binding: absent matches absent, epsilon
//! matches epsilon, null matches null.

use std::collections::BTreeSet;

use hartig_core::tuple::MappingTuple;
use tracing::{debug, trace};

use super::JoinCondition;
use crate::explain::{push_child, ExplainNode};
use crate::plan::Plan;
use crate::traits::{OpError, Operator};

pub struct EquiJoinOperator {
    left: Box<Plan>,
    right: Box<Plan>,
    conditions: Vec<JoinCondition>,
}

impl EquiJoinOperator {
    pub fn new(
        left: impl Into<Plan>,
        right: impl Into<Plan>,
        left_attributes: Vec<String>,
        right_attributes: Vec<String>,
    ) -> Result<Self, OpError> {
        let left = left.into();
        let right = right.into();

        let shared: Vec<String> = left
            .attributes()
            .intersection(&right.attributes())
            .cloned()
            .collect();
        if !shared.is_empty() {
            return Err(OpError::IncompatibleSchema { shared });
        }
        if left_attributes.len() != right_attributes.len() {
            return Err(OpError::MalformedJoinCondition {
                left: left_attributes.len(),
                right: right_attributes.len(),
            });
        }

        let conditions = left_attributes
            .into_iter()
            .zip(right_attributes)
            .map(|(l, r)| JoinCondition::new(l, r))
            .collect();
        Ok(Self {
            left: Box::new(left),
            right: Box::new(right),
            conditions,
        })
    }

    /// Build from `(left, right)` attribute pairs.
    pub fn on<I, L, R>(left: impl Into<Plan>, right: impl Into<Plan>, pairs: I) -> Result<Self, OpError>
    where
        I: IntoIterator<Item = (L, R)>,
        L: Into<String>,
        R: Into<String>,
    {
        let (l, r): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(l, r)| (l.into(), r.into()))
            .unzip();
        Self::new(left, right, l, r)
    }

    fn matches(&self, l: &MappingTuple, r: &MappingTuple) -> bool {
        self.conditions
            .iter()
            .all(|c| l.get(&c.left) == r.get(&c.right))
    }
}

impl Operator for EquiJoinOperator {
    fn name(&self) -> &'static str {
        "equijoin"
    }

    fn attributes(&self) -> BTreeSet<String> {
        let mut attrs = self.left.attributes();
        attrs.extend(self.right.attributes());
        attrs
    }

    fn execute(&self) -> Result<Vec<MappingTuple>, OpError> {
        let left = self.left.execute()?;
        let right = self.right.execute()?;
        trace!(op = self.name(), left = left.len(), right = right.len(), "inputs");

        let mut out = Vec::new();
        for l in &left {
            for r in &right {
                if self.matches(l, r) {
                    out.push(l.merged(r));
                }
            }
        }
        debug!(
            op = self.name(),
            conditions = self.conditions.len(),
            tuples = out.len(),
            "done"
        );
        Ok(out)
    }

    fn explain_lines(&self) -> Vec<String> {
        let conds: Vec<String> = self.conditions.iter().map(ToString::to_string).collect();
        let mut lines = vec![
            "EquiJoin(".to_string(),
            format!("  conditions: [{}]", conds.join(", ")),
        ];
        push_child(&mut lines, "left", self.left.as_ref(), false);
        push_child(&mut lines, "right", self.right.as_ref(), true);
        lines.push(")".to_string());
        lines
    }

    fn explain_json(&self) -> ExplainNode {
        let conditions: Vec<serde_json::Value> = self
            .conditions
            .iter()
            .map(|c| serde_json::json!({ "left": c.left, "right": c.right }))
            .collect();
        ExplainNode::new("EquiJoin")
            .with_parameter("join_conditions", conditions)
            .with_sides(self.left.explain_json(), self.right.explain_json())
    }
}
