//! Blurt Viewer
//!
//! Browses posts, trending tags and user profiles from the Blurt JSON-RPC API
//! and serves them as HTML. Uses hexagonal (ports & adapters) architecture:
//! the feed controller and services only see the `RemoteFeedApi` port.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{http::Method, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;

use adapters::JsonRpcClient;
use app::{FeedController, ProfileService, TagService};
use config::Config;
use domain::ports::RemoteFeedApi;

/// Application state shared across all handlers
///
/// One feed session per process: every request drives the same controller.
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedController<dyn RemoteFeedApi>>,
    pub tags: Arc<TagService<dyn RemoteFeedApi>>,
    pub profiles: Arc<ProfileService<dyn RemoteFeedApi>>,
}

impl AppState {
    pub fn new(api: Arc<dyn RemoteFeedApi>, config: &Config) -> Self {
        Self {
            feed: Arc::new(FeedController::new(api.clone(), config.posts_per_page)),
            tags: Arc::new(TagService::new(api.clone())),
            profiles: Arc::new(ProfileService::new(api)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(handlers::index))
        .route("/feed/next", get(handlers::next_page))
        .route("/feed/state", get(handlers::feed_state))
        .route("/tags", get(handlers::trending_tags))
        .route("/users/:username", get(handlers::get_profile))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,blurt_viewer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Blurt Viewer...");

    let config = Config::from_env();

    let api = Arc::new(
        JsonRpcClient::from_config(&config).context("Failed to build JSON-RPC client")?,
    );
    tracing::info!(
        api = %config.api_url,
        relay = config.relay_url.as_deref().unwrap_or("disabled"),
        page_size = config.posts_per_page,
        "Using Blurt API"
    );

    let app = router(AppState::new(api, &config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
