use anyhow::Result;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tower_http::services::ServeDir;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::analytics::{
    self, duration_popularity_correlation, top_decades_by_popularity, top_genres_by_popularity,
    AnalyticsError,
};
use crate::dataset::{DatasetError, SpotifyDataset};
use crate::deezer::{enrich_chart, DeezerError, EnrichedTrack, EnrichmentError, GenreResolver};

use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub service: &'static str,
    pub version: &'static str,
    pub uptime: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// Failures surfaced to API consumers, each with its own status code and a
/// descriptive `detail` body rather than a generic fault.
enum ApiError {
    Dataset(DatasetError),
    Analytics(AnalyticsError),
    ChartUnavailable(DeezerError),
    Enrichment(EnrichmentError),
}

impl From<DatasetError> for ApiError {
    fn from(err: DatasetError) -> Self {
        ApiError::Dataset(err)
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        ApiError::Analytics(err)
    }
}

impl From<DeezerError> for ApiError {
    fn from(err: DeezerError) -> Self {
        ApiError::ChartUnavailable(err)
    }
}

impl From<EnrichmentError> for ApiError {
    fn from(err: EnrichmentError) -> Self {
        ApiError::Enrichment(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Dataset(err @ DatasetError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            ApiError::Dataset(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Analytics(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ApiError::ChartUnavailable(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            ApiError::Enrichment(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[derive(Deserialize, Debug)]
struct TopNQuery {
    top_n: Option<usize>,
}

#[derive(Serialize)]
struct DeezerChartResponse {
    total_tracks: usize,
    tracks: Vec<EnrichedTrack>,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        service: "OpenSound Analytics",
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_uptime(state.start_time.elapsed()),
    };
    Json(stats)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn get_deezer_chart(State(state): State<ServerState>) -> Result<Response, ApiError> {
    let payload = state.deezer.fetch_chart().await?;
    let tracks = enrich_chart(payload, &state.resolver).await?;

    Ok(Json(DeezerChartResponse {
        total_tracks: tracks.len(),
        tracks,
    })
    .into_response())
}

async fn clear_resolver_cache(
    State(resolver): State<GuardedGenreResolver>,
) -> impl IntoResponse {
    resolver.clear();
    Json(serde_json::json!({ "status": "cache cleared" }))
}

/// Serialize ranked (key, value) pairs as a JSON object in rank order.
fn ordered_map<K: ToString>(ranked: Vec<(K, f64)>) -> serde_json::Map<String, serde_json::Value> {
    ranked
        .into_iter()
        .map(|(key, value)| (key.to_string(), serde_json::json!(value)))
        .collect()
}

async fn get_top_genres(
    State(config): State<ServerConfig>,
    Query(query): Query<TopNQuery>,
) -> Result<Response, ApiError> {
    let dataset = SpotifyDataset::load(&config.dataset_path)?;
    let top_n = query.top_n.unwrap_or(analytics::DEFAULT_TOP_N);
    let top_genres = top_genres_by_popularity(&dataset, top_n)?;

    Ok(Json(serde_json::json!({
        "top_genres": ordered_map(top_genres),
        "total_tracks_analyzed": dataset.row_count(),
    }))
    .into_response())
}

async fn get_top_decades(
    State(config): State<ServerConfig>,
    Query(query): Query<TopNQuery>,
) -> Result<Response, ApiError> {
    let dataset = SpotifyDataset::load(&config.dataset_path)?;
    let top_n = query.top_n.unwrap_or(analytics::DEFAULT_TOP_N);
    let top_decades = top_decades_by_popularity(&dataset, top_n)?;

    Ok(Json(serde_json::json!({
        "top_decades": ordered_map(top_decades),
        "total_tracks_analyzed": dataset.row_count(),
    }))
    .into_response())
}

async fn get_duration_popularity_correlation(
    State(config): State<ServerConfig>,
) -> Result<Response, ApiError> {
    let dataset = SpotifyDataset::load(&config.dataset_path)?;
    let correlation = duration_popularity_correlation(&dataset)?;

    Ok(Json(serde_json::json!({
        "correlation": correlation,
        "total_tracks_analyzed": dataset.row_count(),
    }))
    .into_response())
}

pub fn make_app(config: ServerConfig, deezer: GuardedDeezerApi) -> Router {
    let resolver = Arc::new(GenreResolver::new(deezer.clone()));
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        deezer,
        resolver,
    };

    let deezer_routes: Router = Router::new()
        .route("/chart", get(get_deezer_chart))
        .route("/cache/clear", post(clear_resolver_cache))
        .with_state(state.clone());

    let spotify_routes: Router = Router::new()
        .route("/top-genres", get(get_top_genres))
        .route("/top-decades", get(get_top_decades))
        .route(
            "/duration-popularity-correlation",
            get(get_duration_popularity_correlation),
        )
        .with_state(state.clone());

    let home_router: Router = match &config.dashboard_dir_path {
        Some(dashboard_path) => {
            let static_files_service =
                ServeDir::new(dashboard_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .route("/health", get(health))
        .nest("/v1/deezer", deezer_routes)
        .nest("/v1/spotify", spotify_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(config: ServerConfig, deezer: GuardedDeezerApi) -> Result<()> {
    let port = config.port;
    let app = make_app(config, deezer);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
