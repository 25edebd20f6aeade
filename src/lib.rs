pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod inference;
pub mod utils;

pub use api::{create_router, AppState};
pub use app::adapters::{CropAdapter, FertilizerAdapter, IrrigationAdapter};
pub use config::GrowwellConfig;
pub use core::{ErrorBody, PredictionOutcome};
pub use domain::model::{CropRequest, Domain, FertilizerRequest, IrrigationRequest};
pub use inference::ModelSet;
pub use utils::error::{GrowwellError, PredictionError, Result};
