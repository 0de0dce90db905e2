//! Chart enrichment pipeline.
//!
//! Takes the raw chart payload, projects each track down to the fields the
//! API exposes and joins in the genre name resolved through the memoized
//! resolver. Output order is the chart order; a remote failure for one album
//! or genre degrades that track's genre to `None` and never fails the batch.

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use super::models::{ChartPayload, EnrichedTrack};
use super::resolver::GenreResolver;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// The chart response is missing `tracks.data` or a track record is
    /// missing a required field. Fatal for the whole enrichment call.
    #[error("Malformed chart payload: {0}")]
    MalformedPayload(String),
}

/// Enrich a raw chart payload into one [`EnrichedTrack`] per chart track.
pub async fn enrich_chart(
    payload: Value,
    resolver: &GenreResolver,
) -> Result<Vec<EnrichedTrack>, EnrichmentError> {
    let chart: ChartPayload = serde_json::from_value(payload)
        .map_err(|err| EnrichmentError::MalformedPayload(err.to_string()))?;

    let tracks = chart.tracks.data;
    info!("{} chart tracks to enrich", tracks.len());

    let mut distinct_albums: Vec<u64> = tracks.iter().map(|t| t.album.id).collect();
    distinct_albums.sort_unstable();
    distinct_albums.dedup();
    info!(
        "Resolving genres for {} distinct albums",
        distinct_albums.len()
    );

    let mut enriched = Vec::with_capacity(tracks.len());
    for track in tracks {
        let genre_id = resolver.resolve_genre_id(track.album.id).await;
        let genre = resolver.resolve_genre_name(genre_id).await;
        enriched.push(EnrichedTrack {
            track: track.title,
            artist: track.artist.name,
            artist_picture: track.artist.picture,
            genre,
            is_explicit_lyrics: track.explicit_lyrics,
        });
    }

    Ok(enriched)
}
