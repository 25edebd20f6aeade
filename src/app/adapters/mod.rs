//! Request handlers, one per model: validate, build features, infer, decode.

pub mod crop;
pub mod fertilizer;
pub mod irrigation;

pub use crop::CropAdapter;
pub use fertilizer::FertilizerAdapter;
pub use irrigation::IrrigationAdapter;

use crate::domain::model::{FeatureRow, ModelOutput};
use crate::domain::ports::Model;
use crate::utils::error::InferenceError;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Runs the model and turns a panic inside it into an inference error.
pub(crate) fn guarded_predict(
    model: &dyn Model,
    row: &FeatureRow,
) -> Result<ModelOutput, InferenceError> {
    catch_unwind(AssertUnwindSafe(|| model.predict(row))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(InferenceError::Panicked(message))
    })
}
