use crate::criterion::Criterion;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown criterion name '{name}'")]
    UnknownCriterion { name: String },

    #[error("Criterion '{0}' is not present in the base weight vector")]
    CriterionNotInWeights(Criterion),

    #[error("Invalid sweep configuration: {reason}")]
    InvalidSweep { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
