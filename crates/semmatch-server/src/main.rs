//! SemMatch HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use semmatch::constants::ALL_DOMAINS;
use semmatch::{Config, FaqDataset, VectorEncoder};
use semmatch_server::gateway::{EngineRegistry, HandlerState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        faq_path = %config.faq_path.display(),
        model = %config.model,
        "SemMatch starting"
    );

    let dataset = FaqDataset::load(&config.faq_path)?;
    tracing::info!(
        domains = ?dataset.domains().collect::<Vec<_>>(),
        "FAQ dataset loaded"
    );

    if config.stub_embedder {
        tracing::warn!("SEMMATCH_STUB_EMBEDDER is set, scores are not semantic");
    }
    let encoder_config = config.encoder_config();
    let encoder =
        tokio::task::spawn_blocking(move || VectorEncoder::load(encoder_config)).await??;

    let registry = Arc::new(EngineRegistry::new(
        dataset,
        Arc::new(encoder),
        config.match_config(),
    ));

    // Build the "all" engine up front so a broken corpus fails startup.
    let warm = Arc::clone(&registry);
    tokio::task::spawn_blocking(move || warm.engine(ALL_DOMAINS).map(|_| ())).await??;

    let app = create_router_with_state(HandlerState::new(registry));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("SemMatch shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("SEMMATCH_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/health", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
