//! YAML → operator tree.
//!
//! Example:
//! ```yaml
//! config:
//!   base_iri: "http://example.org/person/"
//! documents:
//!   team:
//!     team:
//!       - { id: 1, roles: [Dev, Admin] }
//!       - { id: 2, roles: [User] }
//! plan:
//!   op: extend
//!   attribute: subject
//!   expression: { call: { function: to_iri, arguments: [ { ref: id } ] } }
//!   input:
//!     op: source
//!     document: team
//!     iterator: "$.team[*]"
//!     mappings:
//!       id: "$.id"
//!       role: "$.roles[*]"
//! ```
//!
//! Plan nodes are tagged by `op` (`source`, `extend`, `union`, `project`,
//! `equijoin`). Expressions are single-key maps: `const`, `iri`, `literal`,
//! `ref`, `call`. A one-argument `to_iri` call picks up `config.base_iri`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::debug;

use hartig_core::config::EngineConfig;
use hartig_core::term::{Iri, Literal};
use hartig_core::value::Value;
use hartig_expr::{Expression, Function};
use hartig_operators::{
    EquiJoinOperator, ExtendOperator, JsonSourceOperator, Plan, ProjectOperator, UnionOperator,
};

use crate::error::PlanError;
use crate::pipeline::Pipeline;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDoc {
    #[serde(default)]
    pub config: Option<PipelineConfig>,
    #[serde(default)]
    pub documents: BTreeMap<String, Json>,
    pub plan: PlanDef,
}

/// Overrides applied on top of an `EngineConfig`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub base_iri: Option<String>,
    pub explain_indent: Option<usize>,
    pub explain_prefix: Option<String>,
}

impl PipelineConfig {
    pub fn apply(&self, cfg: &mut EngineConfig) {
        if let Some(base) = &self.base_iri {
            cfg.base_iri = Some(base.clone());
        }
        if let Some(indent) = self.explain_indent {
            cfg.explain_indent = indent;
        }
        if let Some(prefix) = &self.explain_prefix {
            cfg.explain_prefix = prefix.clone();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PlanDef {
    Source {
        document: String,
        iterator: String,
        #[serde(default)]
        mappings: serde_yaml::Mapping,
    },
    Extend {
        attribute: String,
        expression: ExprDef,
        input: Box<PlanDef>,
    },
    Union {
        inputs: Vec<PlanDef>,
    },
    Project {
        attributes: Vec<String>,
        input: Box<PlanDef>,
    },
    #[serde(rename = "equijoin")]
    EquiJoin {
        left: Box<PlanDef>,
        right: Box<PlanDef>,
        #[serde(default)]
        left_attributes: Vec<String>,
        #[serde(default)]
        right_attributes: Vec<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExprDef {
    Const(Json),
    Iri(String),
    Literal {
        value: String,
        #[serde(default)]
        datatype: Option<String>,
        #[serde(default)]
        language: Option<String>,
    },
    Ref(String),
    Call {
        function: String,
        #[serde(default)]
        arguments: Vec<ExprDef>,
    },
}

/// Parse a pipeline, starting from `EngineConfig::from_env()`.
pub fn parse_yaml_pipeline(yaml_src: &str) -> Result<Pipeline, PlanError> {
    parse_yaml_pipeline_with(yaml_src, EngineConfig::from_env(), BTreeMap::new())
}

/// Parse a pipeline with an explicit base config and caller-supplied
/// documents. A name defined both inline and by the caller is an error.
pub fn parse_yaml_pipeline_with(
    yaml_src: &str,
    base: EngineConfig,
    documents: BTreeMap<String, Json>,
) -> Result<Pipeline, PlanError> {
    let doc: PipelineDoc = serde_yaml::from_str(yaml_src)?;

    let mut config = base;
    if let Some(overrides) = &doc.config {
        overrides.apply(&mut config);
    }
    config.validate()?;

    let mut all = documents;
    for (name, tree) in doc.documents {
        if all.contains_key(&name) {
            return Err(PlanError::DuplicateDocument(name));
        }
        all.insert(name, tree);
    }

    let lowering = Lowering {
        config: &config,
        documents: &all,
    };
    let root = lowering.plan(&doc.plan)?;
    debug!(documents = all.len(), "pipeline: built");
    Ok(Pipeline::new(root, config))
}

struct Lowering<'a> {
    config: &'a EngineConfig,
    documents: &'a BTreeMap<String, Json>,
}

impl Lowering<'_> {
    fn plan(&self, def: &PlanDef) -> Result<Plan, PlanError> {
        Ok(match def {
            PlanDef::Source {
                document,
                iterator,
                mappings,
            } => {
                let tree = self
                    .documents
                    .get(document)
                    .ok_or_else(|| PlanError::UnknownDocument(document.clone()))?;
                let mappings = source_mappings(mappings)?;
                JsonSourceOperator::new(tree.clone(), iterator, mappings)?.into()
            }
            PlanDef::Extend {
                attribute,
                expression,
                input,
            } => ExtendOperator::new(self.plan(input)?, attribute.clone(), self.expr(expression)?)
                .into(),
            PlanDef::Union { inputs } => UnionOperator::new(
                inputs
                    .iter()
                    .map(|i| self.plan(i))
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .into(),
            PlanDef::Project { attributes, input } => {
                ProjectOperator::new(self.plan(input)?, attributes.iter().cloned())?.into()
            }
            PlanDef::EquiJoin {
                left,
                right,
                left_attributes,
                right_attributes,
            } => EquiJoinOperator::new(
                self.plan(left)?,
                self.plan(right)?,
                left_attributes.clone(),
                right_attributes.clone(),
            )?
            .into(),
        })
    }

    fn expr(&self, def: &ExprDef) -> Result<Expression, PlanError> {
        Ok(match def {
            ExprDef::Const(v) => Expression::Constant(Value::from_json(v)),
            ExprDef::Iri(iri) => Expression::constant(Iri::parse(iri.as_str())?),
            ExprDef::Literal {
                value,
                datatype,
                language,
            } => {
                let lit = match (datatype, language) {
                    (Some(_), Some(_)) => {
                        return Err(PlanError::Invalid(format!(
                            "literal '{value}' has both a datatype and a language"
                        )))
                    }
                    (Some(dt), None) => Literal::new(value.as_str(), Iri::parse(dt.as_str())?),
                    (None, Some(lang)) => Literal::lang(value.as_str(), lang.as_str()),
                    (None, None) => Literal::simple(value.as_str()),
                };
                Expression::constant(lit)
            }
            ExprDef::Ref(attribute) => Expression::reference(attribute.as_str()),
            ExprDef::Call {
                function,
                arguments,
            } => {
                let f = Function::from_name(function)
                    .ok_or_else(|| PlanError::UnknownFunction(function.clone()))?;
                let mut args = arguments
                    .iter()
                    .map(|a| self.expr(a))
                    .collect::<Result<Vec<_>, _>>()?;
                if f == Function::ToIri && args.len() == 1 {
                    if let Some(base) = &self.config.base_iri {
                        args.push(Expression::constant(base.as_str()));
                    }
                }
                Expression::call(f, args)
            }
        })
    }
}

fn source_mappings(mappings: &serde_yaml::Mapping) -> Result<Vec<(String, String)>, PlanError> {
    mappings
        .iter()
        .map(|(k, v)| match (k.as_str(), v.as_str()) {
            (Some(attr), Some(query)) => Ok((attr.to_string(), query.to_string())),
            _ => Err(PlanError::Invalid(format!(
                "source mapping {k:?} must map an attribute name to a query string"
            ))),
        })
        .collect()
}
