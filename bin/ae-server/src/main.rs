//! Analytics Exposure API Server
//!
//! Serves the standardized northbound analytics exposure interface:
//! subscription management and on-demand analytics fetch, plus health
//! metadata, an OpenAPI document, and Swagger UI.
//!
//! ## Configuration
//!
//! Reads `config.toml` (or the file named by `AE_CONFIG`) with environment
//! overrides:
//! - `AE_HTTP_HOST` / `AE_HTTP_PORT`: bind address (default 0.0.0.0:8080)
//! - `AE_CORS_ORIGINS`: comma-separated allowed origins, `*` for any
//! - `LOG_FORMAT=json` for JSON logs, `RUST_LOG` for filtering

use std::sync::Arc;

use ae_config::ConfigLoader;
use ae_exposure::api::{create_router, BASE_PATH};
use ae_exposure::{AnalyticsQueryEngine, SubscriptionRegistry};
use anyhow::Result;
use axum::http::HeaderValue;
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for local development)
    let _ = dotenvy::dotenv();

    ae_common::logging::init_logging("ae-server");

    info!("Starting Analytics Exposure API server");

    let config = ConfigLoader::new().load()?;

    let registry = Arc::new(SubscriptionRegistry::new());
    let analytics = Arc::new(AnalyticsQueryEngine::new());

    let app = create_router(registry, analytics)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.http.cors_origins));

    let addr = format!("{}:{}", config.http.host, config.http.port);
    let listener = TcpListener::bind(&addr).await?;

    info!(addr = %addr, base_path = BASE_PATH, "HTTP API listening");
    info!("Health check available at http://{}/health", addr);
    info!("OpenAPI document available at http://{}/api-doc/openapi.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Analytics Exposure API server stopped");
    Ok(())
}

/// Build the CORS layer from configured origins. `*` allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
