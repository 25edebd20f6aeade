//! CSV batch mode: one prediction per row, written back with `result` and
//! `predicted_at` columns appended.

use crate::client::backend::AdvisorBackend;
use crate::core::outcome::PredictionOutcome;
use crate::domain::model::{CropRequest, Domain, FertilizerRequest, IrrigationRequest};
use crate::utils::error::Result;
use csv::StringRecord;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::io::{Read, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub succeeded: usize,
    pub failed: usize,
}

fn parse_row<T: DeserializeOwned>(
    record: &StringRecord,
    headers: &StringRecord,
) -> std::result::Result<T, String> {
    record
        .deserialize(Some(headers))
        .map_err(|e| format!("Invalid row: {}", e))
}

/// Success text, or the error message with its details joined by `; `.
fn outcome_text<T: Display>(outcome: Result<PredictionOutcome<T>>) -> std::result::Result<String, String> {
    match outcome {
        Ok(PredictionOutcome::Success(value)) => Ok(value.to_string()),
        Ok(PredictionOutcome::Failure(body)) => {
            let mut text = body.error;
            if let Some(details) = body.details {
                text = format!("{}: {}", text, details.join("; "));
            }
            Err(text)
        }
        Err(e) => Err(e.user_friendly_message()),
    }
}

async fn predict_row<B: AdvisorBackend + ?Sized>(
    backend: &B,
    domain: Domain,
    record: &StringRecord,
    headers: &StringRecord,
) -> std::result::Result<String, String> {
    match domain {
        Domain::Crop => {
            let request: CropRequest = parse_row(record, headers)?;
            outcome_text(backend.recommend_crop(&request).await)
        }
        Domain::Fertilizer => {
            let request: FertilizerRequest = parse_row(record, headers)?;
            outcome_text(backend.recommend_fertilizer(&request).await)
        }
        Domain::Irrigation => {
            let request: IrrigationRequest = parse_row(record, headers)?;
            outcome_text(backend.predict_irrigation(&request).await)
        }
    }
}

/// Rows are processed in order; a failing row is recorded and the run goes on.
pub async fn run_batch<B, R, W>(
    backend: &B,
    domain: Domain,
    input: R,
    output: W,
) -> Result<BatchSummary>
where
    B: AdvisorBackend + ?Sized,
    R: Read,
    W: Write,
{
    let mut reader = csv::Reader::from_reader(input);
    let mut writer = csv::Writer::from_writer(output);

    let headers = reader.headers()?.clone();
    let mut out_headers = headers.clone();
    out_headers.push_field("result");
    out_headers.push_field("predicted_at");
    writer.write_record(&out_headers)?;

    let mut summary = BatchSummary::default();
    for record in reader.records() {
        let record = record?;
        summary.rows += 1;

        let result = match predict_row(backend, domain, &record, &headers).await {
            Ok(text) => {
                summary.succeeded += 1;
                text
            }
            Err(text) => {
                tracing::warn!("⚠️ {} row {} failed: {}", domain, summary.rows, text);
                summary.failed += 1;
                text
            }
        };

        let mut row = record.clone();
        row.push_field(&result);
        row.push_field(&chrono::Utc::now().to_rfc3339());
        writer.write_record(&row)?;
    }
    writer.flush()?;

    tracing::info!(
        "📊 {} batch: {} rows, {} succeeded, {} failed",
        domain,
        summary.rows,
        summary.succeeded,
        summary.failed
    );
    Ok(summary)
}
