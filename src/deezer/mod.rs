pub mod client;
pub mod enrichment;
pub mod models;
pub mod resolver;
#[cfg(test)]
pub mod testing;

pub use client::{DeezerApi, DeezerClient, DeezerError, DEFAULT_BASE_URL};
pub use enrichment::{enrich_chart, EnrichmentError};
pub use models::EnrichedTrack;
pub use resolver::GenreResolver;
