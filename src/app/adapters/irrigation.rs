use crate::app::adapters::guarded_predict;
use crate::core::validators::validate_irrigation_inputs;
use crate::domain::model::{Domain, FeatureRow, IrrigationRequest, ModelOutput};
use crate::domain::ports::Model;
use crate::utils::error::{InferenceError, PredictionError};
use std::sync::Arc;

#[derive(Clone)]
pub struct IrrigationAdapter {
    model: Arc<dyn Model>,
}

/// Rounds to two decimal places, ties to even (10.125 -> 10.12).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

impl IrrigationAdapter {
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model }
    }

    /// Units are part of the column names the irrigation model was trained on.
    pub fn features(req: &IrrigationRequest) -> FeatureRow {
        FeatureRow::new()
            .text("Region", &req.region)
            .text("Crop_Type", &req.crop_type)
            .text("Soil_Type", &req.soil_type)
            .text("Season", &req.season)
            .number("Farm_Area(acres)", req.farm_area)
            .number("Soil_pH", req.soil_ph)
            .number("Nitrogen(kg/ha)", req.nitrogen)
            .number("Phosphorus(kg/ha)", req.phosphorus)
            .number("Potassium(kg/ha)", req.potassium)
            .number("Soil_Moisture(%)", req.soil_moisture)
            .number("Temperature(°C)", req.temperature)
            .number("Rainfall(mm)", req.rainfall)
    }

    /// Water requirement in cubic meters, rounded to two decimals.
    pub fn predict(&self, req: &IrrigationRequest) -> Result<f64, PredictionError> {
        tracing::debug!("Irrigation prediction request: {:?}", req);

        let details = validate_irrigation_inputs(req);
        if !details.is_empty() {
            tracing::warn!("Rejected irrigation request: {}", details.join("; "));
            return Err(PredictionError::Validation { details });
        }

        self.infer(req).map_err(|e| {
            tracing::error!("Irrigation prediction failed: {}", e);
            PredictionError::inference(Domain::Irrigation, e)
        })
    }

    fn infer(&self, req: &IrrigationRequest) -> Result<f64, InferenceError> {
        let row = Self::features(req);
        let raw = match guarded_predict(self.model.as_ref(), &row)? {
            ModelOutput::Value(v) => v,
            ModelOutput::Class(label) => label.as_f64().ok_or_else(|| {
                InferenceError::UnexpectedOutput(format!("non-numeric label '{}'", label))
            })?,
        };

        if !raw.is_finite() {
            return Err(InferenceError::UnexpectedOutput(format!(
                "non-finite water volume {}",
                raw
            )));
        }
        if raw < 0.0 {
            tracing::warn!("Irrigation model returned {} m³, clamping to 0", raw);
            return Ok(0.0);
        }
        Ok(round2(raw))
    }
}
