//! HTTP client for the public Deezer API.
//!
//! Three endpoints are used: the current chart, album metadata (for genre
//! ids) and genre metadata (for genre names). No retries; a non-200 status
//! or transport error surfaces as a [`DeezerError`] for the caller to absorb.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::models::{AlbumResponse, GenreResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.deezer.com";

/// Errors from a single remote metadata request.
#[derive(Debug, Error)]
pub enum DeezerError {
    #[error("Deezer request failed with status {0}")]
    Status(StatusCode),

    #[error("Deezer request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Remote metadata source for chart enrichment.
///
/// Abstracted behind a trait so tests can substitute a call-counting fake.
#[async_trait]
pub trait DeezerApi: Send + Sync {
    /// Fetch the current chart feed as raw JSON.
    ///
    /// Kept untyped so the enrichment pipeline owns the distinction between
    /// an unreachable feed and a malformed one.
    async fn fetch_chart(&self) -> Result<serde_json::Value, DeezerError>;

    /// Fetch album metadata for a single album id.
    async fn fetch_album(&self, album_id: u64) -> Result<AlbumResponse, DeezerError>;

    /// Fetch genre metadata for a single genre id.
    async fn fetch_genre(&self, genre_id: u64) -> Result<GenreResponse, DeezerError>;
}

/// Client for the public Deezer API.
#[derive(Clone)]
pub struct DeezerClient {
    client: Client,
    base_url: String,
}

impl DeezerClient {
    /// Create a new DeezerClient.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Deezer API (e.g., "https://api.deezer.com")
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: &str, timeout_sec: u64) -> Result<Self, DeezerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        // Ensure base_url doesn't have a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, DeezerError> {
        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(DeezerError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl DeezerApi for DeezerClient {
    async fn fetch_chart(&self) -> Result<serde_json::Value, DeezerError> {
        let url = format!("{}/chart", self.base_url);
        self.get_json(&url).await
    }

    async fn fetch_album(&self, album_id: u64) -> Result<AlbumResponse, DeezerError> {
        let url = format!("{}/album/{}", self.base_url, album_id);
        self.get_json(&url).await
    }

    async fn fetch_genre(&self, genre_id: u64) -> Result<GenreResponse, DeezerError> {
        let url = format!("{}/genre/{}", self.base_url, genre_id);
        self.get_json(&url).await
    }
}
