//! sitecopy API server
//!
//! HTTP front end for the parse / recover / export / generate pipeline.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::client::ModelClient;
use crate::config::ModelSettings;
use crate::pipeline::BusyFlag;

/// API Server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub settings: ModelSettings,
    /// Used when a generate request carries no key of its own.
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            settings: ModelSettings::default(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("settings", &self.settings)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub version: String,
    /// One generation at a time across all requests.
    pub busy: BusyFlag,
    pub settings: ModelSettings,
    pub api_key: Option<String>,
    /// Fixed model client; when unset a Gemini client is built per request.
    pub client: Option<Arc<dyn ModelClient>>,
}

impl AppState {
    pub fn new(settings: ModelSettings, api_key: Option<String>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            busy: BusyFlag::new(),
            settings,
            api_key,
            client: None,
        }
    }

    /// State that sends every generation to `client`.
    pub fn with_client(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client: Some(client),
            ..Self::new(ModelSettings::default(), None)
        }
    }
}

/// Router with all endpoints and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .route("/api/v1/parse", post(handlers::parse))
        .route("/api/v1/recover", post(handlers::recover))
        .route("/api/v1/export", post(handlers::export))
        .route("/api/v1/export/csv", post(handlers::export_csv))
        .route("/api/v1/generate", post(handlers::generate))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitecopy_server=info,sitecopy=info,tower_http=info".into()),
        )
        .init();

    let state = Arc::new(AppState::new(config.settings.clone(), config.api_key.clone()));
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("sitecopy API server starting on http://{}", addr);
    info!("   Endpoints: /api/v1/parse, /api/v1/recover, /api/v1/export, /api/v1/generate");
    info!("   Model: {} at {}", config.settings.model, config.settings.endpoint);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("sitecopy API server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
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

    info!("Shutdown signal received, stopping server...");
}
