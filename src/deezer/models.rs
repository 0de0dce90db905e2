//! Wire types for the Deezer chart feed and metadata endpoints.

use serde::{Deserialize, Serialize};

/// Raw chart payload as returned by `GET {base}/chart`.
///
/// Only the fields this service consumes are modeled; everything else in the
/// feed is ignored during deserialization.
#[derive(Deserialize, Debug, Clone)]
pub struct ChartPayload {
    pub tracks: ChartTrackList,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ChartTrackList {
    pub data: Vec<RawChartTrack>,
}

/// One track record of the raw chart feed.
///
/// All fields are required; a record missing any of them makes the whole
/// payload malformed (genre resolution without an album id is meaningless).
#[derive(Deserialize, Debug, Clone)]
pub struct RawChartTrack {
    pub title: String,
    pub artist: RawChartArtist,
    pub album: RawChartAlbum,
    pub explicit_lyrics: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawChartArtist {
    pub name: String,
    pub picture: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawChartAlbum {
    pub id: u64,
}

/// Album metadata as returned by `GET {base}/album/{id}`.
///
/// Genre tagging is frequently absent, so the whole chain down to the genre
/// id is optional rather than a parse error.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AlbumResponse {
    pub genres: Option<AlbumGenres>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AlbumGenres {
    #[serde(default)]
    pub data: Vec<GenreRef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GenreRef {
    pub id: Option<u64>,
}

/// Genre metadata as returned by `GET {base}/genre/{id}`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct GenreResponse {
    pub name: Option<String>,
}

/// A chart track joined with its resolved genre name.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EnrichedTrack {
    pub track: String,
    pub artist: String,
    pub artist_picture: String,
    pub genre: Option<String>,
    pub is_explicit_lyrics: bool,
}

impl AlbumResponse {
    /// The album's primary genre id: first entry of `genres.data`, if any.
    pub fn primary_genre_id(&self) -> Option<u64> {
        self.genres
            .as_ref()
            .and_then(|genres| genres.data.first())
            .and_then(|genre| genre.id)
    }
}
