//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own dataset file and its own
//! Deezer client pointed at the test's stub.
#![allow(dead_code)] // Not every test binary uses every helper

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use opensound_server::deezer::DeezerClient;
use opensound_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

const SERVER_READY_TIMEOUT_MS: u64 = 5000;
const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Dataset content used unless a test provides its own.
pub const DEFAULT_DATASET: &str = "\
playlist_genre,track_popularity,duration_ms,track_album_release_date
pop,90,180000,2019-06-14
pop,70,200000,2021-01-01
rock,60,240000,1995-03-20
rock,20,260000,1997-11-02
latin,50,210000,2015-07-09
";

/// Test server instance with an isolated dataset file.
///
/// When dropped, the server gracefully shuts down and temp resources are
/// cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    // Private fields - keep resources alive until drop
    _dataset_file: NamedTempFile,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server with the default dataset, talking to the given stub.
    pub async fn spawn(deezer_base_url: &str) -> Self {
        Self::spawn_with_dataset(deezer_base_url, DEFAULT_DATASET).await
    }

    /// Spawns a server over the given CSV content.
    ///
    /// # Panics
    ///
    /// Panics if the dataset file cannot be written, the port cannot be
    /// bound, or the server does not become ready within the timeout.
    pub async fn spawn_with_dataset(deezer_base_url: &str, dataset_csv: &str) -> Self {
        let mut dataset_file = NamedTempFile::new().expect("Failed to create dataset file");
        write!(dataset_file, "{}", dataset_csv).expect("Failed to write dataset file");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port,
            dataset_path: dataset_file.path().to_path_buf(),
            dashboard_dir_path: None,
        };

        let deezer = Arc::new(
            DeezerClient::new(deezer_base_url, 5).expect("Failed to build Deezer client"),
        );
        let app = make_app(config, deezer);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            _dataset_file: dataset_file,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Path of the dataset file this server reads on each analytics request.
    pub fn dataset_path(&self) -> &std::path::Path {
        self._dataset_file.path()
    }

    /// Waits for the server to become ready by polling the health endpoint.
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client
                .get(format!("{}/health", self.base_url))
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    return;
                }
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}
