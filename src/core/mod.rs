pub mod outcome;
pub mod validators;

pub use crate::domain::model::{ClassLabel, Domain, FeatureRow, FeatureValue, ModelOutput};
pub use crate::domain::ports::Model;
pub use crate::utils::error::Result;
pub use outcome::{ErrorBody, PredictionOutcome};
