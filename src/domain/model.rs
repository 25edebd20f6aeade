use crate::domain::limits::Quantity;
use crate::domain::ports::{BoundedField, BoundedFields};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Domain {
    Crop,
    Fertilizer,
    Irrigation,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Crop, Domain::Fertilizer, Domain::Irrigation];

    pub fn key(self) -> &'static str {
        match self {
            Domain::Crop => "crop",
            Domain::Fertilizer => "fertilizer",
            Domain::Irrigation => "irrigation",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Domain::Crop => "Crop",
            Domain::Fertilizer => "Fertilizer",
            Domain::Irrigation => "Irrigation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRequest {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub ph: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

/// Field names follow the wire format the clients already send,
/// including the `Temparature` spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerRequest {
    #[serde(rename = "Temparature")]
    pub temperature: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Moisture")]
    pub moisture: f64,
    #[serde(rename = "Soil_Type")]
    pub soil_type: String,
    #[serde(rename = "Crop_Type")]
    pub crop_type: String,
    #[serde(rename = "Nitrogen")]
    pub nitrogen: f64,
    #[serde(rename = "Potassium")]
    pub potassium: f64,
    #[serde(rename = "Phosphorous")]
    pub phosphorous: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationRequest {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Crop_Type")]
    pub crop_type: String,
    #[serde(rename = "Soil_Type")]
    pub soil_type: String,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Farm_Area")]
    pub farm_area: f64,
    #[serde(rename = "Soil_pH")]
    pub soil_ph: f64,
    #[serde(rename = "Nitrogen")]
    pub nitrogen: f64,
    #[serde(rename = "Phosphorus")]
    pub phosphorus: f64,
    #[serde(rename = "Potassium")]
    pub potassium: f64,
    #[serde(rename = "Soil_Moisture")]
    pub soil_moisture: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Rainfall")]
    pub rainfall: f64,
}

impl BoundedFields for CropRequest {
    fn bounded_fields(&self) -> Vec<BoundedField> {
        vec![
            BoundedField::new("N", self.n, Quantity::Nitrogen),
            BoundedField::new("P", self.p, Quantity::Phosphorus),
            BoundedField::new("K", self.k, Quantity::Potassium),
            BoundedField::new("ph", self.ph, Quantity::Ph),
            BoundedField::new("temperature", self.temperature, Quantity::Temperature),
            BoundedField::new("humidity", self.humidity, Quantity::Humidity),
            BoundedField::new("rainfall", self.rainfall, Quantity::Rainfall),
        ]
    }
}

impl BoundedFields for FertilizerRequest {
    fn bounded_fields(&self) -> Vec<BoundedField> {
        vec![
            BoundedField::new("Temparature", self.temperature, Quantity::Temperature),
            BoundedField::new("Humidity", self.humidity, Quantity::Humidity),
            BoundedField::new("Moisture", self.moisture, Quantity::SoilMoisture),
            BoundedField::new("Nitrogen", self.nitrogen, Quantity::Nitrogen),
            BoundedField::new("Potassium", self.potassium, Quantity::Potassium),
            BoundedField::new("Phosphorous", self.phosphorous, Quantity::Phosphorus),
        ]
    }
}

impl BoundedFields for IrrigationRequest {
    fn bounded_fields(&self) -> Vec<BoundedField> {
        vec![
            BoundedField::new("Farm_Area", self.farm_area, Quantity::FarmArea),
            BoundedField::new("Soil_pH", self.soil_ph, Quantity::Ph),
            BoundedField::new("Nitrogen", self.nitrogen, Quantity::Nitrogen),
            BoundedField::new("Phosphorus", self.phosphorus, Quantity::Phosphorus),
            BoundedField::new("Potassium", self.potassium, Quantity::Potassium),
            BoundedField::new("Soil_Moisture", self.soil_moisture, Quantity::SoilMoisture),
            BoundedField::new("Temperature", self.temperature, Quantity::Temperature),
            BoundedField::new("Rainfall", self.rainfall, Quantity::Rainfall),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

/// One row of model input. Column order is the order the adapter built it in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number(mut self, column: &str, value: f64) -> Self {
        self.columns
            .push((column.to_string(), FeatureValue::Number(value)));
        self
    }

    pub fn text(mut self, column: &str, value: &str) -> Self {
        self.columns
            .push((column.to_string(), FeatureValue::Text(value.to_string())));
        self
    }

    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A class as emitted by a classifier. Artifacts may store classes as
/// integers, floats or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ClassLabel {
    /// Integer view of the label: floats truncate toward zero, text must parse as an integer.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            ClassLabel::Integer(i) => Some(*i),
            ClassLabel::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            ClassLabel::Float(_) => None,
            ClassLabel::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ClassLabel::Integer(i) => Some(*i as f64),
            ClassLabel::Float(f) => Some(*f),
            ClassLabel::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Integer(i) => write!(f, "{}", i),
            ClassLabel::Float(v) => write!(f, "{}", v),
            ClassLabel::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Class(ClassLabel),
    Value(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerRecommendation {
    pub fertilizer: String,
}

impl fmt::Display for FertilizerRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fertilizer)
    }
}
