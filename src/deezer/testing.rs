//! Call-counting fake [`DeezerApi`] shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::client::{DeezerApi, DeezerError};
use super::models::{AlbumResponse, GenreResponse};

/// Fake remote with album id -> genre id -> name fixtures and per-endpoint
/// hit counters.
#[derive(Default)]
pub struct FakeDeezer {
    pub chart: Option<Value>,
    pub chart_unavailable: bool,
    pub album_genres: HashMap<u64, u64>,
    pub genre_names: HashMap<u64, String>,
    pub failing_albums: Vec<u64>,
    pub failing_genres: Vec<u64>,
    pub album_calls: AtomicUsize,
    pub genre_calls: AtomicUsize,
}

impl FakeDeezer {
    pub fn album_call_count(&self) -> usize {
        self.album_calls.load(Ordering::SeqCst)
    }

    pub fn genre_call_count(&self) -> usize {
        self.genre_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeezerApi for FakeDeezer {
    async fn fetch_chart(&self) -> Result<Value, DeezerError> {
        if self.chart_unavailable {
            return Err(DeezerError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(self
            .chart
            .clone()
            .unwrap_or_else(|| json!({ "tracks": { "data": [] } })))
    }

    async fn fetch_album(&self, album_id: u64) -> Result<AlbumResponse, DeezerError> {
        self.album_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_albums.contains(&album_id) {
            return Err(DeezerError::Status(StatusCode::NOT_FOUND));
        }
        let album = match self.album_genres.get(&album_id) {
            Some(genre_id) => serde_json::from_value(json!({
                "genres": { "data": [{ "id": genre_id }] }
            }))
            .unwrap(),
            None => AlbumResponse::default(),
        };
        Ok(album)
    }

    async fn fetch_genre(&self, genre_id: u64) -> Result<GenreResponse, DeezerError> {
        self.genre_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_genres.contains(&genre_id) {
            return Err(DeezerError::Status(StatusCode::NOT_FOUND));
        }
        Ok(GenreResponse {
            name: self.genre_names.get(&genre_id).cloned(),
        })
    }
}

/// A minimal raw chart track record.
pub fn chart_track(title: &str, album_id: u64) -> Value {
    json!({
        "title": title,
        "artist": { "name": "Artist", "picture": "http://img" },
        "album": { "id": album_id },
        "explicit_lyrics": false
    })
}

/// A raw chart payload wrapping the given track records.
pub fn chart_payload(tracks: Vec<Value>) -> Value {
    json!({ "tracks": { "data": tracks } })
}
