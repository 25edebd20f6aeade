#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{ClientArgs, ClientCommand, ServerArgs};
pub use toml_config::{ClientConfig, GrowwellConfig, LoggingConfig, ModelsConfig, ServerConfig};
