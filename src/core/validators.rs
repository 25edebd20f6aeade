//! Semantic range checks run by the adapters before any inference.
//!
//! Each validator walks its fields in a fixed order and reports one message per
//! violation, in that same order.

use crate::domain::limits::Quantity;
use crate::domain::model::{CropRequest, FertilizerRequest, IrrigationRequest};

/// A numeric field as it appears in a violation message.
#[derive(Debug, Clone, Copy)]
pub struct FieldCheck {
    pub label: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub quantity: Quantity,
}

impl FieldCheck {
    pub fn new(label: &'static str, value: f64, unit: &'static str, quantity: Quantity) -> Self {
        Self {
            label,
            unit,
            value,
            quantity,
        }
    }

    fn violation(&self) -> Option<String> {
        let limit = self.quantity.limit();
        if limit.contains(self.value) {
            return None;
        }
        Some(format!(
            "{} {}{} is out of range {}",
            self.label, self.value, self.unit, limit
        ))
    }
}

pub fn validate(checks: &[FieldCheck]) -> Vec<String> {
    checks.iter().filter_map(FieldCheck::violation).collect()
}

pub fn validate_crop_inputs(req: &CropRequest) -> Vec<String> {
    validate(&[
        FieldCheck::new("Nitrogen", req.n, " kg/ha", Quantity::Nitrogen),
        FieldCheck::new("Phosphorus", req.p, " kg/ha", Quantity::Phosphorus),
        FieldCheck::new("Potassium", req.k, " kg/ha", Quantity::Potassium),
        FieldCheck::new("Soil pH", req.ph, "", Quantity::Ph),
        FieldCheck::new("Temperature", req.temperature, "°C", Quantity::Temperature),
        FieldCheck::new("Humidity", req.humidity, "%", Quantity::Humidity),
        FieldCheck::new("Rainfall", req.rainfall, " mm/day", Quantity::Rainfall),
    ])
}

pub fn validate_fertilizer_inputs(req: &FertilizerRequest) -> Vec<String> {
    validate(&[
        FieldCheck::new("Nitrogen", req.nitrogen, " kg/ha", Quantity::Nitrogen),
        FieldCheck::new("Phosphorus", req.phosphorous, " kg/ha", Quantity::Phosphorus),
        FieldCheck::new("Potassium", req.potassium, " kg/ha", Quantity::Potassium),
        FieldCheck::new("Temperature", req.temperature, "°C", Quantity::Temperature),
        FieldCheck::new("Humidity", req.humidity, "%", Quantity::Humidity),
        FieldCheck::new("Soil moisture", req.moisture, "%", Quantity::SoilMoisture),
    ])
}

pub fn validate_irrigation_inputs(req: &IrrigationRequest) -> Vec<String> {
    validate(&[
        FieldCheck::new("Nitrogen", req.nitrogen, " kg/ha", Quantity::Nitrogen),
        FieldCheck::new("Phosphorus", req.phosphorus, " kg/ha", Quantity::Phosphorus),
        FieldCheck::new("Potassium", req.potassium, " kg/ha", Quantity::Potassium),
        FieldCheck::new("Soil pH", req.soil_ph, "", Quantity::Ph),
        FieldCheck::new("Temperature", req.temperature, "°C", Quantity::Temperature),
        FieldCheck::new("Rainfall", req.rainfall, " mm", Quantity::Rainfall),
        FieldCheck::new("Soil moisture", req.soil_moisture, "%", Quantity::SoilMoisture),
        FieldCheck::new("Farm area", req.farm_area, "", Quantity::FarmArea),
    ])
}
