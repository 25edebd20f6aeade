use crate::core::outcome::{ErrorBody, PredictionOutcome};
use crate::domain::model::{Domain, FertilizerRecommendation};
use crate::utils::error::GrowwellError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// `<assets>/<crop>.webp`, then `.jpg`, keyed by the lower-cased crop name.
pub fn find_crop_image(assets_dir: &Path, crop: &str) -> Option<PathBuf> {
    let stem = crop.to_lowercase();
    ["webp", "jpg"]
        .iter()
        .map(|ext| assets_dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.is_file())
}

pub fn render_failure<W: Write>(out: &mut W, body: &ErrorBody) -> io::Result<()> {
    writeln!(out, "❌ {}", body.error)?;
    if let Some(details) = &body.details {
        for detail in details {
            writeln!(out, "   - {}", detail)?;
        }
    }
    Ok(())
}

pub fn render_crop<W: Write>(
    out: &mut W,
    outcome: &PredictionOutcome<String>,
    assets_dir: &Path,
) -> io::Result<()> {
    match outcome {
        PredictionOutcome::Success(crop) => {
            writeln!(out, "🌾 Recommended Crop: {}", crop)?;
            match find_crop_image(assets_dir, crop) {
                Some(path) => writeln!(out, "🖼️  {}", path.display()),
                None => writeln!(out, "No image available for {}.", crop),
            }
        }
        PredictionOutcome::Failure(body) => render_failure(out, body),
    }
}

pub fn render_fertilizer<W: Write>(
    out: &mut W,
    outcome: &PredictionOutcome<FertilizerRecommendation>,
) -> io::Result<()> {
    match outcome {
        PredictionOutcome::Success(rec) => {
            writeln!(out, "🧪 Recommended Fertilizer: {}", rec.fertilizer)
        }
        PredictionOutcome::Failure(body) => render_failure(out, body),
    }
}

pub fn render_irrigation<W: Write>(out: &mut W, outcome: &PredictionOutcome<f64>) -> io::Result<()> {
    match outcome {
        PredictionOutcome::Success(volume) => {
            writeln!(out, "💧 Recommended Irrigation: {} cubic meters", volume)?;
            writeln!(out, "   Estimated Irrigation (m³): {}", volume)
        }
        PredictionOutcome::Failure(body) => render_failure(out, body),
    }
}

/// Network and backend faults, as opposed to a prediction that failed.
pub fn render_transport_error<W: Write>(
    out: &mut W,
    domain: Domain,
    err: &GrowwellError,
) -> io::Result<()> {
    writeln!(out, "❌ {} prediction failed: {}", domain, err.user_friendly_message())?;
    writeln!(out, "💡 {}", err.recovery_suggestion())
}
