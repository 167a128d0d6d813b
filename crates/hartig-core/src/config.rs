//! Engine configuration that downstream crates can serialize/deserialize.
//!
//! Operators never read this; the planner consults it when it builds an
//! operator tree and when it renders explain text.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::term::has_scheme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base used by `to_iri` calls that do not name a base of their own.
    pub base_iri: Option<String>,

    /// Leading spaces for every line of `Pipeline::explain()`.
    pub explain_indent: usize,

    /// String written before the indentation on every explain line.
    pub explain_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_iri: None,
            explain_indent: 0,
            explain_prefix: String::new(),
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `HARTIG_BASE_IRI`: default base IRI
    /// - `HARTIG_EXPLAIN_INDENT`: explain indentation (spaces)
    /// - `HARTIG_EXPLAIN_PREFIX`: explain line prefix
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("HARTIG_BASE_IRI") {
            if !s.trim().is_empty() {
                cfg.base_iri = Some(s.trim().to_string());
            }
        }

        if let Ok(s) = std::env::var("HARTIG_EXPLAIN_INDENT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.explain_indent = v;
            }
        }

        if let Ok(s) = std::env::var("HARTIG_EXPLAIN_PREFIX") {
            cfg.explain_prefix = s;
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(base) = &self.base_iri {
            if !has_scheme(base) {
                return Err(Error::Config(format!(
                    "base_iri '{base}' must be an absolute IRI"
                )));
            }
        }
        Ok(())
    }
}
