use std::path::PathBuf;

use super::RequestsLoggingLevel;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Path to the Spotify dataset CSV, reloaded on each analytics request.
    pub dataset_path: PathBuf,
    /// Path to a static dashboard directory to serve at the root.
    pub dashboard_dir_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 8000,
            dataset_path: PathBuf::from("data/raw/high_popularity_spotify_data.csv"),
            dashboard_dir_path: None,
        }
    }
}
