use axum::extract::FromRef;

use crate::deezer::{DeezerApi, GenreResolver};
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedDeezerApi = Arc<dyn DeezerApi>;
pub type GuardedGenreResolver = Arc<GenreResolver>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub deezer: GuardedDeezerApi,
    pub resolver: GuardedGenreResolver,
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for GuardedGenreResolver {
    fn from_ref(input: &ServerState) -> Self {
        input.resolver.clone()
    }
}
