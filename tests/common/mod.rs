#![allow(dead_code)]

use growwell::config::ModelsConfig;
use std::path::PathBuf;

/// The model artifacts checked into `models/`.
pub fn shipped_models() -> ModelsConfig {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models");
    ModelsConfig {
        crop: root.join("crop_best.json"),
        fertilizer: root.join("fertilizer_best_model.json"),
        irrigation: root.join("irrigation_best_model.json"),
    }
}

pub fn crop_body() -> serde_json::Value {
    serde_json::json!({
        "N": 90, "P": 42, "K": 43, "ph": 6.5,
        "temperature": 20.8, "humidity": 82, "rainfall": 202.9
    })
}

pub fn fertilizer_body() -> serde_json::Value {
    serde_json::json!({
        "Temparature": 25, "Humidity": 50, "Moisture": 30,
        "Soil_Type": "Loamy", "Crop_Type": "Maize",
        "Nitrogen": 50, "Potassium": 20, "Phosphorous": 30
    })
}

pub fn irrigation_body() -> serde_json::Value {
    serde_json::json!({
        "Region": "North India", "Crop_Type": "Wheat", "Soil_Type": "Loamy",
        "Season": "Rabi", "Farm_Area": 1.0, "Soil_pH": 6.5,
        "Nitrogen": 0, "Phosphorus": 0, "Potassium": 0,
        "Soil_Moisture": 30, "Temperature": 25, "Rainfall": 0
    })
}
