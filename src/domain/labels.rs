use crate::domain::model::ClassLabel;
use crate::utils::error::InferenceError;

pub const CROP_MAPPING: [&str; 22] = [
    "apple", "banana", "blackgram", "chickpea", "coconut", "coffee", "cotton", "grapes",
    "jute", "kidneybeans", "lentil", "maize", "mango", "mothbeans", "mungbean", "muskmelon",
    "orange", "papaya", "pigeonpeas", "pomegranate", "rice", "watermelon",
];

// "17-17-17 " carries a trailing space in the trained label set.
pub const FERTILIZER_MAPPING: [&str; 10] = [
    "Urea", "DAP", "Potassium chloride", "17-17-17 ", "28-28", "20-20", "10-26-26",
    "Superphosphate", "14-14-14", "TSP",
];

pub const UNKNOWN_CROP: &str = "Unknown";

pub fn label_at(mapping: &[&'static str], index: i64) -> Option<&'static str> {
    usize::try_from(index)
        .ok()
        .and_then(|i| mapping.get(i).copied())
}

/// Out-of-range indices become `"Unknown"`; a label that is not an index at all is an error.
pub fn decode_crop(label: &ClassLabel) -> Result<String, InferenceError> {
    let index = label
        .as_index()
        .ok_or_else(|| InferenceError::NotAnIndex(label.to_string()))?;
    Ok(label_at(&CROP_MAPPING, index)
        .unwrap_or(UNKNOWN_CROP)
        .to_string())
}

/// Never fails: anything that does not map falls back to the raw label text.
pub fn decode_fertilizer(label: &ClassLabel) -> String {
    label
        .as_index()
        .and_then(|index| label_at(&FERTILIZER_MAPPING, index))
        .map(str::to_string)
        .unwrap_or_else(|| label.to_string())
}
