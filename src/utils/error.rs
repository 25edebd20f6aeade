use crate::domain::model::Domain;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrowwellError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    StartupError(#[from] StartupError),

    #[error("Backend returned HTTP {status}: {body}")]
    BackendStatusError { status: u16, body: String },

    #[error("{domain} model is not available")]
    ModelUnavailable { domain: Domain },
}

impl GrowwellError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            GrowwellError::ApiError(e) if e.is_connect() => {
                "Could not reach the GrowWell backend".to_string()
            }
            GrowwellError::ApiError(e) if e.is_timeout() => {
                "The GrowWell backend did not answer in time".to_string()
            }
            GrowwellError::ConfigError { .. } | GrowwellError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            GrowwellError::StartupError(e) => format!("Model loading failed: {}", e),
            _ => self.to_string(),
        }
    }

    /// 對應的處理建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GrowwellError::ApiError(_) | GrowwellError::BackendStatusError { .. } => {
                "Check that the server is running and BACKEND_URL points at it"
            }
            GrowwellError::ConfigError { .. } | GrowwellError::InvalidConfigValueError { .. } => {
                "Review growwell.toml and the command-line overrides"
            }
            GrowwellError::StartupError(_) | GrowwellError::ModelUnavailable { .. } => {
                "Make sure the model artifacts exist under [models] and are valid JSON ensembles"
            }
            GrowwellError::CsvError(_) => "Make sure the CSV header uses the request field names",
            GrowwellError::IoError(_) => "Check file paths and permissions",
            GrowwellError::SerializationError(_) => "The payload could not be encoded or decoded",
        }
    }
}

pub type Result<T> = std::result::Result<T, GrowwellError>;

/// Coarse classification shared by every failure the service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Inference,
    Startup,
}

/// Failures raised by a model while building features or predicting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("missing feature column '{0}'")]
    MissingColumn(String),

    #[error("unexpected feature column '{0}'")]
    UnexpectedColumn(String),

    #[error("feature column '{column}' expects a {expected} value")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },

    #[error("unknown category '{value}' for feature column '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error("invalid class index '{0}'")]
    NotAnIndex(String),

    #[error("unexpected model output: {0}")]
    UnexpectedOutput(String),

    #[error("model panicked: {0}")]
    Panicked(String),
}

/// Outcome of a failed adapter call. Never leaves the process as a transport fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Invalid input values")]
    Validation { details: Vec<String> },

    #[error("{domain} prediction failed: {message}")]
    Inference { domain: Domain, message: String },
}

impl PredictionError {
    pub fn inference(domain: Domain, err: impl std::fmt::Display) -> Self {
        PredictionError::Inference {
            domain,
            message: err.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictionError::Validation { .. } => ErrorKind::Validation,
            PredictionError::Inference { .. } => ErrorKind::Inference,
        }
    }

    pub fn details(&self) -> Option<&[String]> {
        match self {
            PredictionError::Validation { details } => Some(details),
            PredictionError::Inference { .. } => None,
        }
    }
}

/// A model artifact that could not be loaded at process start.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to load {} model from '{}': {source}", .domain.key(), .path.display())]
    Read {
        domain: Domain,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load {} model from '{}': {source}", .domain.key(), .path.display())]
    Decode {
        domain: Domain,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load {} model from '{}': {reason}", .domain.key(), .path.display())]
    Malformed {
        domain: Domain,
        path: PathBuf,
        reason: String,
    },
}

impl StartupError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Startup
    }

    pub fn domain(&self) -> Domain {
        match self {
            StartupError::Read { domain, .. }
            | StartupError::Decode { domain, .. }
            | StartupError::Malformed { domain, .. } => *domain,
        }
    }
}
