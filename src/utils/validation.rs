//! Field checks behind [`Validate`] for the loaded configuration.

use crate::utils::error::{GrowwellError, Result};
use std::path::Path;
use url::Url;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> GrowwellError {
    GrowwellError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The client only speaks plain HTTP(S) to the advisor backend.
pub fn validate_url(field: &str, raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Err(invalid(field, raw, "backend URL is empty"));
    }
    let url = Url::parse(raw).map_err(|e| invalid(field, raw, format!("not a URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            raw,
            format!("scheme '{}' is not http or https", url.scheme()),
        ));
    }
    Ok(())
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        Err(invalid(field, path, "path is empty"))
    } else if path.contains('\0') {
        Err(invalid(field, path, "path contains a NUL byte"))
    } else {
        Ok(())
    }
}

pub fn validate_positive_number(field: &str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("must be at least {}", min)));
    }
    Ok(())
}

/// Model artifacts are matched on extension only; the content is checked at load.
pub fn validate_file_extension(field: &str, file: &str, allowed: &[&str]) -> Result<()> {
    let ext = Path::new(file).extension().and_then(|ext| ext.to_str());
    match ext {
        Some(ext) if allowed.contains(&ext) => Ok(()),
        Some(ext) => Err(invalid(
            field,
            file,
            format!(".{} is not one of: {}", ext, allowed.join(", ")),
        )),
        None => Err(invalid(field, file, "file name has no extension")),
    }
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "must not be blank"));
    }
    Ok(())
}

/// Accepts a bare level name; full `RUST_LOG` directives go through the environment.
pub fn validate_log_level(field: &str, level: &str) -> Result<()> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(invalid(
            field,
            level,
            format!("expected one of {}", LOG_LEVELS.join(", ")),
        ))
    }
}
