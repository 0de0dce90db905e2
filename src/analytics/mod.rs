//! Stateless aggregate analytics over the Spotify dataset.
//!
//! Each function takes a loaded dataset; the column names it needs are fixed
//! by the dataset schema: `playlist_genre`, `track_popularity`, `duration_ms`
//! and `track_album_release_date`.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::dataset::SpotifyDataset;

pub const GENRE_COLUMN: &str = "playlist_genre";
pub const POPULARITY_COLUMN: &str = "track_popularity";
pub const DURATION_COLUMN: &str = "duration_ms";
pub const RELEASE_DATE_COLUMN: &str = "track_album_release_date";

pub const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("No valid rows remain after cleaning")]
    NoValidData,

    #[error("Correlation is undefined for this dataset (zero variance)")]
    UndefinedCorrelation,
}

fn require_column(dataset: &SpotifyDataset, name: &str) -> Result<usize, AnalyticsError> {
    dataset
        .column_index(name)
        .ok_or_else(|| AnalyticsError::MissingColumn(name.to_string()))
}

fn parse_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Top N genres by total popularity, descending.
///
/// Duplicate rows are counted once; rows with a missing genre or popularity
/// are dropped.
pub fn top_genres_by_popularity(
    dataset: &SpotifyDataset,
    top_n: usize,
) -> Result<Vec<(String, f64)>, AnalyticsError> {
    let genre_col = require_column(dataset, GENRE_COLUMN)?;
    let popularity_col = require_column(dataset, POPULARITY_COLUMN)?;

    let mut seen = HashSet::new();
    let mut totals: HashMap<String, f64> = HashMap::new();
    let mut dropped = 0usize;

    for row in dataset.rows() {
        if !seen.insert(row) {
            continue;
        }
        let genre = row[genre_col].trim();
        let popularity = parse_cell(&row[popularity_col]);
        match (genre.is_empty(), popularity) {
            (false, Some(popularity)) => {
                *totals.entry(genre.to_string()).or_insert(0.0) += popularity;
            }
            _ => dropped += 1,
        }
    }
    debug!("{} rows dropped while cleaning genre data", dropped);

    let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(top_n);
    Ok(ranked)
}

/// Release date -> year. Accepts `YYYY-MM-DD`, `YYYY-MM` and bare `YYYY`;
/// anything else counts as missing.
fn parse_release_year(cell: &str) -> Option<i32> {
    let trimmed = cell.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.year());
    }
    let year_part = trimmed.split('-').next()?;
    if year_part.len() == 4 {
        year_part.parse().ok()
    } else {
        None
    }
}

/// Top N decades by mean popularity, descending.
pub fn top_decades_by_popularity(
    dataset: &SpotifyDataset,
    top_n: usize,
) -> Result<Vec<(i32, f64)>, AnalyticsError> {
    let date_col = require_column(dataset, RELEASE_DATE_COLUMN)?;
    let popularity_col = require_column(dataset, POPULARITY_COLUMN)?;

    let mut sums: HashMap<i32, (f64, usize)> = HashMap::new();
    for row in dataset.rows() {
        let year = match parse_release_year(&row[date_col]) {
            Some(year) => year,
            None => continue,
        };
        let popularity = match parse_cell(&row[popularity_col]) {
            Some(popularity) => popularity,
            None => continue,
        };
        let decade = year.div_euclid(10) * 10;
        let entry = sums.entry(decade).or_insert((0.0, 0));
        entry.0 += popularity;
        entry.1 += 1;
    }

    if sums.is_empty() {
        return Err(AnalyticsError::NoValidData);
    }

    let mut ranked: Vec<(i32, f64)> = sums
        .into_iter()
        .map(|(decade, (sum, count))| (decade, sum / count as f64))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(top_n);
    Ok(ranked)
}

/// Pearson correlation between track duration (in minutes) and popularity.
pub fn duration_popularity_correlation(
    dataset: &SpotifyDataset,
) -> Result<f64, AnalyticsError> {
    let duration_col = require_column(dataset, DURATION_COLUMN)?;
    let popularity_col = require_column(dataset, POPULARITY_COLUMN)?;

    let mut durations = Vec::new();
    let mut popularities = Vec::new();
    for row in dataset.rows() {
        if let (Some(duration_ms), Some(popularity)) = (
            parse_cell(&row[duration_col]),
            parse_cell(&row[popularity_col]),
        ) {
            durations.push(duration_ms / 60_000.0);
            popularities.push(popularity);
        }
    }

    if durations.is_empty() {
        return Err(AnalyticsError::NoValidData);
    }

    pearson(&durations, &popularities).ok_or(AnalyticsError::UndefinedCorrelation)
}

/// Pearson coefficient of two equal-length series, `None` when undefined
/// (fewer than two points or zero variance in either series).
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 {
        return None;
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }

    Some((covariance / (variance_x * variance_y).sqrt()).clamp(-1.0, 1.0))
}
