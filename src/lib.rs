pub mod aggregator;
pub mod config;
pub mod github;
pub mod links;
pub mod releases;
pub mod views;

use aggregator::ReleaseAggregator;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use config::{AppConfig, RepoId};
use releases::RepositoryResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Shared application state accessible to all request handlers.
pub struct AppState {
    /// Service for fetching releases from GitHub.
    pub aggregator: ReleaseAggregator,
}

impl AppState {
    /// Initializes the application state, including the GitHub client.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let aggregator = ReleaseAggregator::new(config)?;
        Ok(Self { aggregator })
    }
}

#[derive(Debug, Deserialize)]
pub struct ReleasesQuery {
    /// A single "owner/name" identifier. Omitted means every configured repository.
    pub repo: Option<String>,
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(listing_page))
        .route("/repo/{*repo}", get(detail_page))
        .route("/releases-api", get(get_releases))
        .route("/api/releases", get(get_releases))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "release-mirror",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_releases(
    Query(query): Query<ReleasesQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<RepositoryResult>> {
    let results = state.aggregator.fetch_requested(query.repo.as_deref()).await;
    tracing::debug!(count = results.len(), "Returning releases");
    Json(results)
}

pub async fn listing_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let results = state.aggregator.fetch_requested(None).await;
    Html(views::render_listing(&results))
}

/// Detail page for one repository. `repo` arrives percent-decoded, e.g. "Anuken/Mindustry",
/// whether or not the caller encoded the slash.
///
/// Anything short of a successful fetch sends the user back to the listing page.
pub async fn detail_page(
    Path(repo): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let repo_id = match repo.parse::<RepoId>() {
        Ok(repo_id) => repo_id,
        Err(e) => {
            tracing::warn!(repo = %repo, "Redirecting to listing: {}", e);
            return Redirect::to("/").into_response();
        }
    };

    let result = state.aggregator.fetch_one(&repo_id).await;
    match result.releases() {
        Some(releases) => Html(views::render_detail(&result.repo, releases)).into_response(),
        None => {
            tracing::warn!(
                repo_id = %repo_id,
                "Redirecting to listing: {}",
                result.error().unwrap_or_default()
            );
            Redirect::to("/").into_response()
        }
    }
}
