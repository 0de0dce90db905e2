//! Memoized genre resolution on top of the Deezer metadata endpoints.
//!
//! Two independent LRU tables, album id -> genre id and genre id -> genre
//! name. Negative results are cached too: chart feeds share a handful of
//! albums across many tracks and a lot of albums carry no genre tag, so a
//! repeated miss must not cost a network call every time.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use tracing::{debug, warn};

use super::client::DeezerApi;

const ALBUM_CACHE_CAPACITY: usize = 500;
const GENRE_CACHE_CAPACITY: usize = 100;

/// Memoizing wrapper around a [`DeezerApi`].
///
/// Remote failures are absorbed here: a failed album or genre lookup resolves
/// to `None` and is cached like any other negative result, so it degrades a
/// single track's genre rather than the whole batch. Both tables live for the
/// lifetime of the process and are shared across requests; locks are only
/// held for cache reads and writes, never across a network call.
pub struct GenreResolver {
    api: Arc<dyn DeezerApi>,
    album_genres: Mutex<LruCache<u64, Option<u64>>>,
    genre_names: Mutex<LruCache<u64, Option<String>>>,
}

impl GenreResolver {
    pub fn new(api: Arc<dyn DeezerApi>) -> Self {
        Self {
            api,
            album_genres: Mutex::new(LruCache::new(
                NonZeroUsize::new(ALBUM_CACHE_CAPACITY).unwrap(),
            )),
            genre_names: Mutex::new(LruCache::new(
                NonZeroUsize::new(GENRE_CACHE_CAPACITY).unwrap(),
            )),
        }
    }

    /// Resolve an album id to its primary genre id.
    ///
    /// Cache hits return without a network call, including cached `None`
    /// results from earlier failures or untagged albums.
    pub async fn resolve_genre_id(&self, album_id: u64) -> Option<u64> {
        if let Some(cached) = self.album_genres.lock().unwrap().get(&album_id).copied() {
            debug!("Album {} genre id cache hit", album_id);
            return cached;
        }

        let genre_id = match self.api.fetch_album(album_id).await {
            Ok(album) => album.primary_genre_id(),
            Err(err) => {
                warn!("Album {} lookup failed, caching no genre: {}", album_id, err);
                None
            }
        };

        self.album_genres.lock().unwrap().put(album_id, genre_id);
        genre_id
    }

    /// Resolve a genre id to its display name.
    ///
    /// A `None` genre id short-circuits to `None` without touching the cache
    /// or the network.
    pub async fn resolve_genre_name(&self, genre_id: Option<u64>) -> Option<String> {
        let genre_id = genre_id?;

        if let Some(cached) = self.genre_names.lock().unwrap().get(&genre_id).cloned() {
            debug!("Genre {} name cache hit", genre_id);
            return cached;
        }

        let name = match self.api.fetch_genre(genre_id).await {
            Ok(genre) => genre.name,
            Err(err) => {
                warn!("Genre {} lookup failed, caching no name: {}", genre_id, err);
                None
            }
        };

        self.genre_names
            .lock()
            .unwrap()
            .put(genre_id, name.clone());
        name
    }

    /// Clear both tables. Both locks are taken before either table is purged
    /// so no caller can observe one table cleared and the other not.
    pub fn clear(&self) {
        let mut album_genres = self.album_genres.lock().unwrap();
        let mut genre_names = self.genre_names.lock().unwrap();
        album_genres.clear();
        genre_names.clear();
    }

    /// Current number of entries in the (album, genre) tables.
    pub fn cached_entries(&self) -> (usize, usize) {
        let albums = self.album_genres.lock().unwrap().len();
        let genres = self.genre_names.lock().unwrap().len();
        (albums, genres)
    }
}
