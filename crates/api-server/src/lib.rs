//! Society Analyzer HTTP API.
//!
//! Routes a symbol to the Society scoring engine, sourcing fundamentals from
//! brapi.dev when a token is configured and from demo fixtures otherwise.

pub mod analysis_routes;
pub mod config;
pub mod demo_data;
pub mod middleware;
pub mod symbol_routes;

use std::sync::Arc;

use analysis_core::FinancialDataProvider;
use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use brapi_client::BrapiClient;
use chrono::{DateTime, Utc};
use fundamental_analysis::SocietyAnalysisEngine;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::analysis_routes::analysis_routes;
use crate::config::ServerConfig;
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::symbol_routes::symbol_routes;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SocietyAnalysisEngine>,
    pub provider: Option<Arc<dyn FinancialDataProvider>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, provider: Option<Arc<dyn FinancialDataProvider>>) -> Self {
        Self {
            engine: Arc::new(SocietyAnalysisEngine::new()),
            provider,
            config: Arc::new(config),
        }
    }

    /// Wire up brapi when a token is configured; demo mode otherwise.
    pub fn from_config(config: ServerConfig) -> Self {
        let provider = config.brapi_token.clone().map(|token| {
            Arc::new(BrapiClient::new(
                token,
                config.brapi_base_url.clone(),
                config.brapi_timeout,
            )) as Arc<dyn FinancialDataProvider>
        });
        Self::new(config, provider)
    }
}

/// Handler error rendered as `500 {"error": ...}`.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": format!("Internal error: {}", self.0) })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub token_status: &'static str,
    pub demo_mode: bool,
    pub timestamp: DateTime<Utc>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let configured = state.config.token_configured();
    Json(HealthResponse {
        status: "ok",
        message: "Society Analyzer API is running",
        token_status: if configured { "configured" } else { "not configured" },
        demo_mode: !configured,
        timestamp: Utc::now(),
    })
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(analysis_routes())
        .merge(symbol_routes())
        .route("/health", get(health_check));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        // The React frontend is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(env_filter()).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    if config.token_configured() {
        tracing::info!("brapi token configured ({})", config.brapi_base_url);
    } else {
        tracing::warn!("BRAPI_TOKEN not set, serving demonstration data");
    }

    let addr = config.bind_addr();
    let app = build_router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Society Analyzer API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
