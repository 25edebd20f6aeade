use clap::Parser;
use growwell::client::{batch, DashboardBackend, Session};
use growwell::config::{ClientArgs, ClientCommand, GrowwellConfig};
use growwell::utils::{logger, validation::Validate};
use growwell::GrowwellError;
use std::fs::File;
use std::io::{self, BufWriter};

fn exit_with(e: &GrowwellError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ClientArgs::parse();

    let (mut config, _) = match GrowwellConfig::from_file_or_default(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => exit_with(&e),
    };
    // 優先順序：設定檔 < BACKEND_URL < --backend-url
    config.apply_env_overrides();
    args.apply(&mut config);

    if config.logging.json {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_logger(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let backend = match DashboardBackend::from_config(&config) {
        Ok(backend) => backend,
        Err(e) => exit_with(&e),
    };
    tracing::debug!(
        "Backend ready (crop local: {}, url: {})",
        backend.crop_is_local(),
        config.client.backend_url
    );

    let domain = match args.command {
        Some(ClientCommand::Batch {
            domain,
            input,
            output,
        }) => {
            let reader = match File::open(&input) {
                Ok(reader) => reader,
                Err(e) => exit_with(&GrowwellError::IoError(e)),
            };
            let result = match output {
                Some(path) => {
                    let writer = BufWriter::new(File::create(&path)?);
                    batch::run_batch(&backend, domain, reader, writer).await
                }
                None => batch::run_batch(&backend, domain, reader, io::stdout().lock()).await,
            };
            match result {
                Ok(summary) => eprintln!(
                    "✅ {} rows processed ({} succeeded, {} failed)",
                    summary.rows, summary.succeeded, summary.failed
                ),
                Err(e) => exit_with(&e),
            }
            return Ok(());
        }
        Some(ClientCommand::Form { domain }) => domain,
        None => None,
    };

    let mut session = Session::new(
        &backend,
        io::stdin().lock(),
        io::stdout(),
        config.client.assets_dir.clone(),
    );
    if let Err(e) = session.run(domain).await {
        exit_with(&e);
    }

    Ok(())
}
