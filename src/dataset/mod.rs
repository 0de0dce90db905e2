//! Loading of the static Spotify track dataset.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// An in-memory tabular view of the Spotify CSV dataset.
///
/// Cells are kept as raw strings; the analytics functions own the parsing of
/// whichever columns they work on, so a value unparseable for one metric does
/// not poison the others. Empty cells count as missing values.
pub struct SpotifyDataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SpotifyDataset {
    /// Load the dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        let dataset = Self { headers, rows };
        info!(
            "Loaded dataset: {} rows, {} columns",
            dataset.row_count(),
            dataset.headers.len()
        );
        Ok(dataset)
    }

    #[cfg(test)]
    pub fn from_rows(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> Self {
        Self {
            headers: headers.into_iter().map(str::to_string).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect(),
        }
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
