use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderName, Method},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::decompression::RequestDecompressionLayer;
use tracing::info;

use super::{
    services::{fetch_manga, health, method_not_allowed, proxy_image},
    state::AppState,
};
use crate::config::Config;
use crate::upstream::HttpClient;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

const ALLOWED_HEADERS: [&str; 9] = [
    "x-csrf-token",
    "x-requested-with",
    "accept",
    "accept-version",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "x-api-version",
];

/// Run the HTTP service; `address` overrides `server.bind_addr`
pub async fn run(address: Option<SocketAddr>) -> Result<(), AnyError> {
    info!("Loading configuration");
    let config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;
    let address = address.unwrap_or(config.server.bind_addr);

    let fetcher = HttpClient::new().map_err(|e| format!("Failed to build HTTP client: {}", e))?;
    let state = AppState::new(config, Arc::new(fetcher));

    let listener = TcpListener::bind(address).await?;
    info!(%address, "mangaproxy listening");

    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// All routes with CORS and request decompression applied.
///
/// The CORS layer is outermost and answers every `OPTIONS` request itself
/// with an empty 200.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/fetch-manga",
            post(fetch_manga).fallback(method_not_allowed),
        )
        .route("/api/proxy-image", get(proxy_image))
        .route("/health", get(health))
        .with_state(state)
        .layer(RequestDecompressionLayer::new())
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
