use crate::app::adapters::guarded_predict;
use crate::core::validators::validate_crop_inputs;
use crate::domain::labels::decode_crop;
use crate::domain::model::{ClassLabel, CropRequest, Domain, FeatureRow, ModelOutput};
use crate::domain::ports::Model;
use crate::utils::error::{InferenceError, PredictionError};
use std::sync::Arc;

#[derive(Clone)]
pub struct CropAdapter {
    model: Arc<dyn Model>,
}

impl CropAdapter {
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model }
    }

    /// Column names exactly as the crop model was trained on.
    pub fn features(req: &CropRequest) -> FeatureRow {
        FeatureRow::new()
            .number("N", req.n)
            .number("P", req.p)
            .number("K", req.k)
            .number("ph", req.ph)
            .number("temperature", req.temperature)
            .number("humidity", req.humidity)
            .number("rainfall", req.rainfall)
    }

    pub fn recommend(&self, req: &CropRequest) -> Result<String, PredictionError> {
        tracing::debug!("Crop recommendation request: {:?}", req);

        let details = validate_crop_inputs(req);
        if !details.is_empty() {
            tracing::warn!("Rejected crop request: {}", details.join("; "));
            return Err(PredictionError::Validation { details });
        }

        self.infer(req).map_err(|e| {
            tracing::error!("Crop prediction failed: {}", e);
            PredictionError::inference(Domain::Crop, e)
        })
    }

    fn infer(&self, req: &CropRequest) -> Result<String, InferenceError> {
        let row = Self::features(req);
        let label = match guarded_predict(self.model.as_ref(), &row)? {
            ModelOutput::Class(label) => label,
            ModelOutput::Value(v) => ClassLabel::Float(v),
        };
        let crop = decode_crop(&label)?;
        tracing::debug!("Crop model answered {} -> {}", label, crop);
        Ok(crop)
    }
}
