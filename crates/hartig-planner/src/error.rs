use hartig_operators::OpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("pipeline yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown document '{0}'")]
    UnknownDocument(String),

    #[error("document '{0}' is defined more than once")]
    DuplicateDocument(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("invalid pipeline: {0}")]
    Invalid(String),

    #[error(transparent)]
    Operator(#[from] OpError),

    #[error(transparent)]
    Core(#[from] hartig_core::Error),
}
