//! A built operator tree together with the config it was built under.

use hartig_core::config::EngineConfig;
use hartig_core::hash::Hash256;
use hartig_core::triple::Triple;
use hartig_core::tuple::MappingTuple;
use hartig_operators::{ExplainNode, OpError, Operator, Plan};
use tracing::debug;

use crate::error::PlanError;

pub struct Pipeline {
    root: Plan,
    config: EngineConfig,
}

impl Pipeline {
    pub fn new(root: impl Into<Plan>, config: EngineConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Plan {
        &self.root
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn execute(&self) -> Result<Vec<MappingTuple>, OpError> {
        self.root.execute()
    }

    /// Explain text using the configured indentation and prefix.
    pub fn explain(&self) -> String {
        self.root
            .explain(self.config.explain_indent, &self.config.explain_prefix)
    }

    pub fn explain_json(&self) -> ExplainNode {
        self.root.explain_json()
    }

    pub fn fingerprint(&self) -> Result<Hash256, PlanError> {
        Ok(self.explain_json().fingerprint()?)
    }

    /// Execute and keep the tuples whose `s`, `p`, `o` attributes form a
    /// valid triple. Other tuples are skipped.
    pub fn triples(&self, s: &str, p: &str, o: &str) -> Result<Vec<Triple>, OpError> {
        let rows = self.execute()?;
        let total = rows.len();
        let triples: Vec<Triple> = rows
            .iter()
            .filter_map(|t| Triple::from_tuple(t, s, p, o))
            .collect();
        debug!(root = self.root.name(), tuples = total, triples = triples.len(), "pipeline: triples");
        Ok(triples)
    }
}
