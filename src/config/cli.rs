use crate::config::toml_config::GrowwellConfig;
use crate::domain::model::Domain;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "growwell")]
#[command(about = "Crop, fertilizer and irrigation recommendation API")]
pub struct ServerArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "growwell.toml")]
    pub config: PathBuf,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,

    /// Abort startup if any model fails to load
    #[arg(long)]
    pub strict: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServerArgs {
    pub fn apply(&self, config: &mut GrowwellConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.strict {
            config.server.strict = true;
        }
        if self.json_logs {
            config.logging.json = true;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "growwell-client")]
#[command(about = "Interactive GrowWell dashboard for the terminal")]
pub struct ClientArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "growwell.toml")]
    pub config: PathBuf,

    /// Backend base URL (overrides BACKEND_URL and the config file)
    #[arg(long)]
    pub backend_url: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<ClientCommand>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ClientCommand {
    /// Fill in a prediction form (all three tabs when no domain is given)
    Form {
        #[arg(value_enum)]
        domain: Option<Domain>,
    },
    /// Run every row of a CSV file through one predictor
    Batch {
        #[arg(long, value_enum)]
        domain: Domain,

        #[arg(long)]
        input: PathBuf,

        /// Defaults to stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl ClientArgs {
    pub fn apply(&self, config: &mut GrowwellConfig) {
        if let Some(url) = &self.backend_url {
            config.client.backend_url = url.clone();
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
    }
}
