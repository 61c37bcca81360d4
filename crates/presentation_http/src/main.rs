//! Faultline gateway server
//!
//! Main entry point: wires the chaos controller, metrics collector, tenant
//! registry, rate limiter, and upstream proxy into the HTTP pipeline and
//! runs it with graceful shutdown.

use std::{sync::Arc, time::Duration};

use application::{AnalyticsService, ChaosController, GatewayMetrics, ThreadRngRandom, UpstreamRouter};
use infrastructure::{AppConfig, HttpUpstreamClient, MemoryAnalyticsStore, MemoryRateLimitStore};
use presentation_http::{routes, spawn_chaos_recovery_task, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first so logging can honor the configured format
    let config = AppConfig::load().unwrap_or_else(|e| {
        // Logging is not up yet
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Failed to load config, using defaults: {e}");
        }
        AppConfig::default()
    });

    init_tracing(&config.server.log_format);

    info!("⛓️ Faultline gateway v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        backends = config.backends.len(),
        tenants = config.tenants.len(),
        "Configuration loaded"
    );

    // Core services
    let chaos = Arc::new(ChaosController::new());
    let metrics = Arc::new(GatewayMetrics::new());
    let analytics = AnalyticsService::new(Arc::new(MemoryAnalyticsStore::new()));
    let tenant_registry = Arc::new(config.tenant_registry());
    let rate_limit = Arc::new(MemoryRateLimitStore::new(
        config.rate_limit.requests_per_window,
        Duration::from_secs(config.rate_limit.window_secs),
    ));
    let upstream_router = Arc::new(UpstreamRouter::new(config.backend_routes()));
    let upstream = Arc::new(
        HttpUpstreamClient::new().map_err(|e| anyhow::anyhow!("upstream client init: {e}"))?,
    );

    let state = AppState {
        chaos: Arc::clone(&chaos),
        metrics,
        analytics,
        tenant_registry,
        rate_limit,
        rate_limit_enabled: config.rate_limit.enabled,
        fault_random: Arc::new(ThreadRngRandom),
        upstream_router,
        upstream,
    };

    // Build router and outer HTTP tracing
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    // Background auto-recovery, stopped explicitly on shutdown
    let recovery_handle = spawn_chaos_recovery_task(
        chaos,
        Some(Duration::from_secs(config.chaos.recovery_interval_secs)),
    );

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Gateway listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    recovery_handle.abort();
    info!("👋 Gateway shutdown complete");

    Ok(())
}

fn init_tracing(log_format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "faultline_gateway=debug,presentation_http=debug,tower_http=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
}
