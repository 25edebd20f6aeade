//! Where the dashboard sends its requests: the HTTP service, in-process
//! adapters, or the mix the dashboard actually uses.

use crate::app::adapters::{CropAdapter, FertilizerAdapter, IrrigationAdapter};
use crate::config::toml_config::GrowwellConfig;
use crate::core::outcome::PredictionOutcome;
use crate::domain::model::{
    CropRequest, Domain, FertilizerRecommendation, FertilizerRequest, IrrigationRequest,
};
use crate::inference::{load_model, ModelSet};
use crate::utils::error::{GrowwellError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use url::Url;

/// A transport failure is an `Err`; a prediction failure is a
/// `PredictionOutcome::Failure` inside `Ok`.
#[async_trait]
pub trait AdvisorBackend: Send + Sync {
    async fn recommend_crop(&self, request: &CropRequest) -> Result<PredictionOutcome<String>>;

    async fn recommend_fertilizer(
        &self,
        request: &FertilizerRequest,
    ) -> Result<PredictionOutcome<FertilizerRecommendation>>;

    async fn predict_irrigation(
        &self,
        request: &IrrigationRequest,
    ) -> Result<PredictionOutcome<f64>>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| GrowwellError::InvalidConfigValueError {
            field: "client.backend_url".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<PredictionOutcome<R>>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let endpoint = self.endpoint(path);
        tracing::debug!("📡 POST {}", endpoint);

        let response = self.client.post(&endpoint).json(body).send().await?;
        let status = response.status();
        tracing::debug!("📡 {} answered {}", endpoint, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GrowwellError::BackendStatusError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<PredictionOutcome<R>>().await?)
    }
}

#[async_trait]
impl AdvisorBackend for HttpBackend {
    async fn recommend_crop(&self, request: &CropRequest) -> Result<PredictionOutcome<String>> {
        self.post("crop/recommend", request).await
    }

    async fn recommend_fertilizer(
        &self,
        request: &FertilizerRequest,
    ) -> Result<PredictionOutcome<FertilizerRecommendation>> {
        self.post("fertilizer/recommend", request).await
    }

    async fn predict_irrigation(
        &self,
        request: &IrrigationRequest,
    ) -> Result<PredictionOutcome<f64>> {
        self.post("irrigation/predict", request).await
    }
}

/// Runs the adapters in this process. Domains without a model answer
/// `ModelUnavailable`.
#[derive(Clone, Default)]
pub struct LocalBackend {
    pub crop: Option<CropAdapter>,
    pub fertilizer: Option<FertilizerAdapter>,
    pub irrigation: Option<IrrigationAdapter>,
}

impl LocalBackend {
    pub fn from_models(models: &ModelSet) -> Self {
        Self {
            crop: models.get(Domain::Crop).map(CropAdapter::new),
            fertilizer: models.get(Domain::Fertilizer).map(FertilizerAdapter::new),
            irrigation: models.get(Domain::Irrigation).map(IrrigationAdapter::new),
        }
    }
}

fn unavailable(domain: Domain) -> GrowwellError {
    GrowwellError::ModelUnavailable { domain }
}

#[async_trait]
impl AdvisorBackend for LocalBackend {
    async fn recommend_crop(&self, request: &CropRequest) -> Result<PredictionOutcome<String>> {
        let adapter = self.crop.as_ref().ok_or_else(|| unavailable(Domain::Crop))?;
        Ok(adapter.recommend(request).into())
    }

    async fn recommend_fertilizer(
        &self,
        request: &FertilizerRequest,
    ) -> Result<PredictionOutcome<FertilizerRecommendation>> {
        let adapter = self
            .fertilizer
            .as_ref()
            .ok_or_else(|| unavailable(Domain::Fertilizer))?;
        Ok(adapter.recommend(request).into())
    }

    async fn predict_irrigation(
        &self,
        request: &IrrigationRequest,
    ) -> Result<PredictionOutcome<f64>> {
        let adapter = self
            .irrigation
            .as_ref()
            .ok_or_else(|| unavailable(Domain::Irrigation))?;
        Ok(adapter.predict(request).into())
    }
}

/// Crop in-process, fertilizer and irrigation over HTTP.
///
/// When the local crop model cannot be loaded, crop requests go over HTTP too.
pub struct DashboardBackend {
    crop: Option<CropAdapter>,
    http: HttpBackend,
}

impl DashboardBackend {
    pub fn new(crop: Option<CropAdapter>, http: HttpBackend) -> Self {
        Self { crop, http }
    }

    pub fn from_config(config: &GrowwellConfig) -> Result<Self> {
        let http = HttpBackend::new(&config.client.backend_url, config.client.timeout_seconds)?;
        let crop = match load_model(Domain::Crop, &config.models.crop) {
            Ok(model) => Some(CropAdapter::new(model)),
            Err(e) => {
                tracing::warn!(
                    "⚠️ Local crop model unavailable, crop requests go to {}: {}",
                    http.base_url(),
                    e
                );
                None
            }
        };
        Ok(Self::new(crop, http))
    }

    pub fn crop_is_local(&self) -> bool {
        self.crop.is_some()
    }
}

#[async_trait]
impl AdvisorBackend for DashboardBackend {
    async fn recommend_crop(&self, request: &CropRequest) -> Result<PredictionOutcome<String>> {
        match &self.crop {
            Some(adapter) => Ok(adapter.recommend(request).into()),
            None => self.http.recommend_crop(request).await,
        }
    }

    async fn recommend_fertilizer(
        &self,
        request: &FertilizerRequest,
    ) -> Result<PredictionOutcome<FertilizerRecommendation>> {
        self.http.recommend_fertilizer(request).await
    }

    async fn predict_irrigation(
        &self,
        request: &IrrigationRequest,
    ) -> Result<PredictionOutcome<f64>> {
        self.http.predict_irrigation(request).await
    }
}
