use polars::prelude::PolarsError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("task {0} not found")]
    TaskNotFound(i32),

    #[error("exam {0} not found")]
    ExamNotFound(i32),

    #[error("class {0} not found")]
    ClassNotFound(i32),

    #[error("record id sequence exhausted")]
    IdsExhausted,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("dataframe error: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlannerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PlannerError::InvalidInput(message.into())
    }

    /// True for errors caused by a missing record rather than bad input.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlannerError::TaskNotFound(_)
                | PlannerError::ExamNotFound(_)
                | PlannerError::ClassNotFound(_)
        )
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
