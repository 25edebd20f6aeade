use crate::domain::limits::Quantity;
use crate::domain::model::{FeatureRow, ModelOutput};
use crate::utils::error::InferenceError;

/// A pre-trained, read-only predictor. Loaded once and shared across requests.
pub trait Model: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<ModelOutput, InferenceError>;
}

impl<F> Model for F
where
    F: Fn(&FeatureRow) -> Result<ModelOutput, InferenceError> + Send + Sync,
{
    fn predict(&self, row: &FeatureRow) -> Result<ModelOutput, InferenceError> {
        self(row)
    }
}

/// A numeric request field and the registry quantity that bounds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedField {
    pub name: &'static str,
    pub value: f64,
    pub quantity: Quantity,
}

impl BoundedField {
    pub fn new(name: &'static str, value: f64, quantity: Quantity) -> Self {
        Self {
            name,
            value,
            quantity,
        }
    }
}

/// Request bodies whose numeric fields are range-checked at the HTTP boundary.
pub trait BoundedFields {
    fn bounded_fields(&self) -> Vec<BoundedField>;
}
