use crate::utils::error::PredictionError;
use serde::{Deserialize, Serialize};

/// `{error, details?}` as returned to callers instead of a transport fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl From<&PredictionError> for ErrorBody {
    fn from(err: &PredictionError) -> Self {
        Self {
            error: err.to_string(),
            details: err.details().map(<[String]>::to_vec),
        }
    }
}

/// Exactly one of a success value or an error body, untagged on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutcome<T> {
    Success(T),
    Failure(ErrorBody),
}

impl<T> PredictionOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success(_))
    }

    pub fn into_result(self) -> Result<T, ErrorBody> {
        match self {
            PredictionOutcome::Success(value) => Ok(value),
            PredictionOutcome::Failure(body) => Err(body),
        }
    }
}

impl<T> From<Result<T, PredictionError>> for PredictionOutcome<T> {
    fn from(result: Result<T, PredictionError>) -> Self {
        match result {
            Ok(value) => PredictionOutcome::Success(value),
            Err(err) => PredictionOutcome::Failure(ErrorBody::from(&err)),
        }
    }
}
