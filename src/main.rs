use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use opensound_server::deezer::{DeezerClient, DEFAULT_BASE_URL};
use opensound_server::server::{run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the Spotify dataset CSV file.
    #[clap(value_parser = parse_path, default_value = "data/raw/high_popularity_spotify_data.csv")]
    pub dataset_path: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Base URL of the Deezer API.
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    pub deezer_base_url: String,

    /// Timeout in seconds for Deezer requests.
    #[clap(long, default_value_t = 30)]
    pub deezer_timeout_sec: u64,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the dashboard directory to be statically served.
    #[clap(long)]
    pub dashboard_dir_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let deezer = Arc::new(DeezerClient::new(
        &cli_args.deezer_base_url,
        cli_args.deezer_timeout_sec,
    )?);

    let config = ServerConfig {
        requests_logging_level: cli_args.logging_level,
        port: cli_args.port,
        dataset_path: cli_args.dataset_path,
        dashboard_dir_path: cli_args.dashboard_dir_path,
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(config, deezer).await
}
