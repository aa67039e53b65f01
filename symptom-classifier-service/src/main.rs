use anyhow::Context as _;
use symptom_classifier_service::{
    ServiceConfig, config::LogFormat, create_app, service::SERVICE_NAME,
};
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber; `RUST_LOG` overrides the default filter
fn init_tracing(log_format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "symptom_classifier_service=debug,graph_flow=debug,tower_http=debug".into()
    });

    match log_format {
        LogFormat::Pretty => {
            // Human-readable logging for development
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        LogFormat::Json => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first so LOG_FORMAT and RUST_LOG may come from .env
    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_format);

    if let Some(path) = &config.env_file {
        debug!(path = %path.display(), "loaded .env file");
    }
    info!(service = SERVICE_NAME, "starting");

    let app = create_app(&config);
    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    let addr = listener.local_addr()?;

    info!("Server running on http://{}", addr);
    info!(
        "Classification endpoint: POST http://{}/classify-symptom",
        addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}
