use clap::Parser;
use growwell::config::{GrowwellConfig, ServerArgs};
use growwell::utils::{logger, validation::Validate};
use growwell::{create_router, AppState, GrowwellError, ModelSet};

fn exit_with(e: &GrowwellError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("🛑 Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    // 載入配置：檔案 → 命令列覆蓋
    let (mut config, found) = match GrowwellConfig::from_file_or_default(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config.display(), e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    args.apply(&mut config);

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_logger(&config.logging.level);
    }

    tracing::info!("🚀 Starting GrowWell API");
    if found {
        tracing::info!("📁 Configuration loaded from {}", args.config.display());
    } else {
        tracing::info!("📁 {} not found, using defaults", args.config.display());
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    // 模型在啟動時一次載入
    let models = match ModelSet::load(&config.models).ensure_servable(config.server.strict) {
        Ok(models) => models,
        Err(e) => exit_with(&e),
    };

    let state = AppState::from_models(&models);
    for domain in state.served_domains() {
        tracing::info!("✅ Serving {} routes", domain.key());
    }
    let app = create_router(state);

    let addr = (config.server.host.as_str(), config.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("📡 Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
