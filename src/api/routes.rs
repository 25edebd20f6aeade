use crate::api::extract::ValidatedJson;
use crate::app::adapters::{CropAdapter, FertilizerAdapter, IrrigationAdapter};
use crate::core::outcome::PredictionOutcome;
use crate::domain::limits::registry;
use crate::domain::model::{
    CropRequest, FertilizerRecommendation, FertilizerRequest, IrrigationRequest,
};
use axum::{extract::State, response::Json};
use serde_json::{json, Map, Value};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `{ "<key>": {"min": .., "max": ..} }` for every registered quantity.
pub async fn limits() -> Json<Value> {
    let table: Map<String, Value> = registry()
        .map(|limit| {
            (
                limit.name.to_string(),
                json!({ "min": limit.min, "max": limit.max }),
            )
        })
        .collect();
    Json(Value::Object(table))
}

pub async fn recommend_crop(
    State(adapter): State<CropAdapter>,
    ValidatedJson(request): ValidatedJson<CropRequest>,
) -> Json<PredictionOutcome<String>> {
    Json(adapter.recommend(&request).into())
}

pub async fn recommend_fertilizer(
    State(adapter): State<FertilizerAdapter>,
    ValidatedJson(request): ValidatedJson<FertilizerRequest>,
) -> Json<PredictionOutcome<FertilizerRecommendation>> {
    Json(adapter.recommend(&request).into())
}

pub async fn predict_irrigation(
    State(adapter): State<IrrigationAdapter>,
    ValidatedJson(request): ValidatedJson<IrrigationRequest>,
) -> Json<PredictionOutcome<f64>> {
    Json(adapter.predict(&request).into())
}
