//! `Plan`: the closed set of operators a tree can be built from.
//!
//! Operators own their children as `Plan` values, so a whole pipeline is a
//! single owned tree with static dispatch at every edge.

use std::collections::BTreeSet;

use hartig_core::tuple::MappingTuple;

use crate::explain::ExplainNode;
use crate::extend::ExtendOperator;
use crate::join::EquiJoinOperator;
use crate::project::ProjectOperator;
use crate::source::json::JsonSourceOperator;
use crate::traits::{OpError, Operator};
use crate::union::UnionOperator;

pub enum Plan {
    Source(JsonSourceOperator),
    Extend(ExtendOperator),
    Union(UnionOperator),
    Project(ProjectOperator),
    EquiJoin(EquiJoinOperator),
}

impl Plan {
    fn inner(&self) -> &dyn Operator {
        match self {
            Plan::Source(op) => op,
            Plan::Extend(op) => op,
            Plan::Union(op) => op,
            Plan::Project(op) => op,
            Plan::EquiJoin(op) => op,
        }
    }
}

impl Operator for Plan {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn attributes(&self) -> BTreeSet<String> {
        self.inner().attributes()
    }

    fn execute(&self) -> Result<Vec<MappingTuple>, OpError> {
        self.inner().execute()
    }

    fn explain_lines(&self) -> Vec<String> {
        self.inner().explain_lines()
    }

    fn explain_json(&self) -> ExplainNode {
        self.inner().explain_json()
    }
}

impl From<JsonSourceOperator> for Plan {
    fn from(op: JsonSourceOperator) -> Self {
        Plan::Source(op)
    }
}

impl From<ExtendOperator> for Plan {
    fn from(op: ExtendOperator) -> Self {
        Plan::Extend(op)
    }
}

impl From<UnionOperator> for Plan {
    fn from(op: UnionOperator) -> Self {
        Plan::Union(op)
    }
}

impl From<ProjectOperator> for Plan {
    fn from(op: ProjectOperator) -> Self {
        Plan::Project(op)
    }
}

impl From<EquiJoinOperator> for Plan {
    fn from(op: EquiJoinOperator) -> Self {
        Plan::EquiJoin(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hartig_expr::Expression;
    use serde_json::json;

    fn source(attribute: &str) -> JsonSourceOperator {
        JsonSourceOperator::new(json!({"xs": [1, 2]}), "$.xs[*]", [(attribute, "$")]).unwrap()
    }

    #[test]
    fn reports_wrapped_operator_name() {
        let plans = [
            Plan::from(source("x")),
            Plan::from(ExtendOperator::new(source("x"), "y", Expression::reference("x"))),
            Plan::from(UnionOperator::new([source("x")])),
            Plan::from(ProjectOperator::new(source("x"), ["x"]).unwrap()),
            Plan::from(EquiJoinOperator::on(source("x"), source("k"), [("x", "k")]).unwrap()),
        ];
        let names: Vec<&str> = plans.iter().map(Operator::name).collect();
        assert_eq!(names, vec!["source", "extend", "union", "project", "equijoin"]);
    }
}
