use crate::app::adapters::guarded_predict;
use crate::core::validators::validate_fertilizer_inputs;
use crate::domain::labels::decode_fertilizer;
use crate::domain::model::{
    ClassLabel, Domain, FeatureRow, FertilizerRecommendation, FertilizerRequest, ModelOutput,
};
use crate::domain::ports::Model;
use crate::utils::error::{InferenceError, PredictionError};
use std::sync::Arc;

#[derive(Clone)]
pub struct FertilizerAdapter {
    model: Arc<dyn Model>,
}

impl FertilizerAdapter {
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model }
    }

    /// The model was trained with `Temperature` and `Soil_Moisture`, so the
    /// request's `Temparature` and `Moisture` are renamed here.
    pub fn features(req: &FertilizerRequest) -> FeatureRow {
        FeatureRow::new()
            .number("Temperature", req.temperature)
            .number("Humidity", req.humidity)
            .number("Soil_Moisture", req.moisture)
            .text("Soil_Type", &req.soil_type)
            .text("Crop_Type", &req.crop_type)
            .number("Nitrogen", req.nitrogen)
            .number("Potassium", req.potassium)
            .number("Phosphorous", req.phosphorous)
    }

    pub fn recommend(
        &self,
        req: &FertilizerRequest,
    ) -> Result<FertilizerRecommendation, PredictionError> {
        tracing::debug!("Fertilizer recommendation request: {:?}", req);

        let details = validate_fertilizer_inputs(req);
        if !details.is_empty() {
            tracing::warn!("Rejected fertilizer request: {}", details.join("; "));
            return Err(PredictionError::Validation { details });
        }

        self.infer(req)
            .map(|fertilizer| FertilizerRecommendation { fertilizer })
            .map_err(|e| {
                tracing::error!("Fertilizer prediction failed: {}", e);
                PredictionError::inference(Domain::Fertilizer, e)
            })
    }

    fn infer(&self, req: &FertilizerRequest) -> Result<String, InferenceError> {
        let row = Self::features(req);
        let label = match guarded_predict(self.model.as_ref(), &row)? {
            ModelOutput::Class(label) => label,
            ModelOutput::Value(v) => ClassLabel::Float(v),
        };
        // 對不到名稱時退回原始標籤，不回傳錯誤
        Ok(decode_fertilizer(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::adapters::test_models;
    use crate::utils::error::ErrorKind;

    fn request() -> FertilizerRequest {
        FertilizerRequest {
            temperature: 26.0,
            humidity: 52.0,
            moisture: 38.0,
            soil_type: "Sandy".into(),
            crop_type: "Maize".into(),
            nitrogen: 37.0,
            potassium: 0.0,
            phosphorous: 0.0,
        }
    }

    #[test]
    fn test_recommend_maps_index_to_name() {
        let adapter = FertilizerAdapter::new(test_models::class(0));
        assert_eq!(adapter.recommend(&request()).unwrap().fertilizer, "Urea");
    }

    #[test]
    fn test_unmapped_label_falls_back_to_raw_value() {
        let adapter = FertilizerAdapter::new(test_models::class(17));
        assert_eq!(adapter.recommend(&request()).unwrap().fertilizer, "17");

        let adapter = FertilizerAdapter::new(test_models::fixed(ModelOutput::Class(
            ClassLabel::Text("Compost".into()),
        )));
        assert_eq!(adapter.recommend(&request()).unwrap().fertilizer, "Compost");
    }

    #[test]
    fn test_renamed_feature_columns() {
        let (model, seen) = test_models::recording(ModelOutput::Class(ClassLabel::Integer(1)));
        let result = FertilizerAdapter::new(model).recommend(&request()).unwrap();
        assert_eq!(result.fertilizer, "DAP");

        let rows = seen.lock().unwrap();
        assert_eq!(
            rows[0].column_names().collect::<Vec<_>>(),
            vec![
                "Temperature",
                "Humidity",
                "Soil_Moisture",
                "Soil_Type",
                "Crop_Type",
                "Nitrogen",
                "Potassium",
                "Phosphorous"
            ]
        );
    }

    #[test]
    fn test_validation_and_inference_errors() {
        let adapter = FertilizerAdapter::new(test_models::class(0));
        let mut req = request();
        req.moisture = 140.0;
        let err = adapter.recommend(&req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.details().unwrap(),
            ["Soil moisture 140% is out of range [0, 100]".to_string()]
        );

        let adapter = FertilizerAdapter::new(test_models::failing(
            InferenceError::UnknownCategory {
                column: "Soil_Type".into(),
                value: "Peat".into(),
            },
        ));
        let err = adapter.recommend(&request()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Fertilizer prediction failed: unknown category 'Peat' for feature column 'Soil_Type'"
        );
    }
}
