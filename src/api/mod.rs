//! HTTP surface: one route group per model plus the liveness probe.

pub mod extract;
pub mod routes;

use crate::app::adapters::{CropAdapter, FertilizerAdapter, IrrigationAdapter};
use crate::domain::model::Domain;
use crate::inference::ModelSet;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Adapters for the domains whose model loaded. `None` means the domain's
/// routes are not mounted.
#[derive(Clone, Default)]
pub struct AppState {
    pub crop: Option<CropAdapter>,
    pub fertilizer: Option<FertilizerAdapter>,
    pub irrigation: Option<IrrigationAdapter>,
}

impl AppState {
    pub fn from_models(models: &ModelSet) -> Self {
        Self {
            crop: models.get(Domain::Crop).map(CropAdapter::new),
            fertilizer: models.get(Domain::Fertilizer).map(FertilizerAdapter::new),
            irrigation: models.get(Domain::Irrigation).map(IrrigationAdapter::new),
        }
    }

    pub fn served_domains(&self) -> Vec<Domain> {
        let mut domains = Vec::new();
        if self.crop.is_some() {
            domains.push(Domain::Crop);
        }
        if self.fertilizer.is_some() {
            domains.push(Domain::Fertilizer);
        }
        if self.irrigation.is_some() {
            domains.push(Domain::Irrigation);
        }
        domains
    }
}

pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(routes::health))
        .route("/limits", get(routes::limits));

    if let Some(adapter) = state.crop {
        router = router.merge(
            Router::new()
                .route("/crop/recommend", post(routes::recommend_crop))
                .with_state(adapter),
        );
    }
    if let Some(adapter) = state.fertilizer {
        router = router.merge(
            Router::new()
                .route("/fertilizer/recommend", post(routes::recommend_fertilizer))
                .with_state(adapter),
        );
    }
    if let Some(adapter) = state.irrigation {
        router = router.merge(
            Router::new()
                .route("/irrigation/predict", post(routes::predict_irrigation))
                .with_state(adapter),
        );
    }

    // Middleware (applied in reverse order)
    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
