//! Terminal dashboard: forms for each model, result rendering and CSV batch runs.

pub mod backend;
pub mod batch;
pub mod form;
pub mod render;
pub mod session;

pub use backend::{AdvisorBackend, DashboardBackend, HttpBackend, LocalBackend};
pub use session::Session;

pub const REGIONS: [&str; 5] = [
    "North India",
    "South India",
    "East India",
    "West India",
    "Central India",
];

/// Soil types the irrigation model knows.
pub const IRRIGATION_SOIL_TYPES: [&str; 4] = ["Sandy", "Loamy", "Clay", "Silty"];

/// Soil types the fertilizer model knows. Not the same list as irrigation.
pub const FERTILIZER_SOIL_TYPES: [&str; 5] = ["Loamy", "Sandy", "Clayey", "Red", "Black"];

pub const SEASONS: [&str; 3] = ["Rabi", "Kharif", "Zaid"];

pub const CROP_TYPES: [&str; 7] = [
    "Pomegranate",
    "Tomato",
    "Wheat",
    "Watermelon",
    "Maize",
    "Oil seeds",
    "Ground Nuts",
];
