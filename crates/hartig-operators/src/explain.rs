//! Explain output: the JSON node type and the text layout helpers.
//!
//! Text layout:
//! ```text
//! Extend(
//!   attribute: subject
//!   expression: to_iri(Ref(id), Const('http://example.org/'))
//!   └─ parent:
//!       Source(
//!         iterator: $.items[*]
//!         mappings:
//!           id: $.id
//!       )
//! )
//! ```

use hartig_core::hash::{hash_serde, Hash256};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::traits::Operator;

const BRANCH: &str = "├─";
const LAST_BRANCH: &str = "└─";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// One operator in an explain_json tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainNode {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_class: Option<String>,

    #[serde(default)]
    pub parameters: Map<String, Json>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<ExplainNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ExplainNode>>,

    /// Binary operators also name their inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<ExplainNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<ExplainNode>>,
}

impl ExplainNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            operator_class: None,
            parameters: Map::new(),
            parent: None,
            children: None,
            left: None,
            right: None,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.operator_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Json>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: ExplainNode) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<ExplainNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Set `left`/`right` and list both sides as `children`.
    #[must_use]
    pub fn with_sides(mut self, left: ExplainNode, right: ExplainNode) -> Self {
        self.children = Some(vec![left.clone(), right.clone()]);
        self.left = Some(Box::new(left));
        self.right = Some(Box::new(right));
        self
    }

    pub fn to_value(&self) -> hartig_core::Result<Json> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> hartig_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Stable hash of the serialized tree; equal trees hash equal.
    pub fn fingerprint(&self) -> hartig_core::Result<Hash256> {
        hash_serde(self)
    }
}

/// Append `label` and the nested explain text of `child` with tree
/// connectors; `last` selects the closing connector.
pub(crate) fn push_child(out: &mut Vec<String>, label: &str, child: &dyn Operator, last: bool) {
    let (branch, cont) = if last { (LAST_BRANCH, SPACE) } else { (BRANCH, PIPE) };
    out.push(format!("  {branch} {label}:"));
    for line in child.explain_lines() {
        out.push(format!("  {cont}{line}"));
    }
}

pub(crate) fn indent_lines(lines: &[String], indent: usize, prefix: &str) -> String {
    let pad = " ".repeat(indent);
    lines
        .iter()
        .map(|line| format!("{prefix}{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
