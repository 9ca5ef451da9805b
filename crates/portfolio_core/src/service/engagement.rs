//! Per-project view counters and star ratings.
//!
//! # Responsibility
//! - Derive the project slug from a detail page path.
//! - Keep view counts and ratings as JSON objects in two key-value slots.
//!
//! # Invariants
//! - Ratings are whole stars in `1..=5`; unrated projects report `0`.
//! - An unreadable slot is treated as empty and rewritten on the next write.

use crate::config::PortfolioConfig;
use crate::storage::{KeyValueStore, StorageError};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

static PROJECT_PAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"projects/(.+?)\.html").expect("valid project page regex"));

/// Extracts `<slug>` from a `.../projects/<slug>.html` path.
pub fn project_slug_from_path(path: &str) -> Option<String> {
    PROJECT_PAGE_RE
        .captures(path)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
}

#[derive(Debug)]
pub enum EngagementError {
    InvalidRating(u8),
    EmptySlug,
    Storage(StorageError),
    Serialization(String),
}

impl Display for EngagementError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRating(value) => write!(
                f,
                "rating {value} out of range; expected {MIN_RATING}..={MAX_RATING}"
            ),
            Self::EmptySlug => write!(f, "project slug cannot be empty"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization(message) => write!(f, "failed to serialize engagement: {message}"),
        }
    }
}

impl Error for EngagementError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for EngagementError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// View and rating bookkeeping over a key-value store.
pub struct EngagementTracker<S> {
    storage: S,
    views_key: String,
    ratings_key: String,
}

impl<S: KeyValueStore> EngagementTracker<S> {
    pub fn new(storage: S, config: &PortfolioConfig) -> Self {
        Self {
            storage,
            views_key: config.views_key.clone(),
            ratings_key: config.ratings_key.clone(),
        }
    }

    /// Counts one page view and returns the new total for `slug`.
    pub fn record_view(&mut self, slug: &str) -> Result<u64, EngagementError> {
        let slug = require_slug(slug)?;
        let mut views: BTreeMap<String, u64> = self.read_map(&self.views_key);
        let count = views.entry(slug.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        let total = *count;
        write_map(&mut self.storage, &self.views_key, &views)?;

        info!(
            "event=project_view module=engagement status=ok views={}",
            total
        );
        Ok(total)
    }

    pub fn views(&self, slug: &str) -> u64 {
        let views: BTreeMap<String, u64> = self.read_map(&self.views_key);
        views.get(slug).copied().unwrap_or(0)
    }

    /// Stores `stars` as the rating for `slug`, replacing any earlier one.
    pub fn rate(&mut self, slug: &str, stars: u8) -> Result<(), EngagementError> {
        let slug = require_slug(slug)?;
        if !(MIN_RATING..=MAX_RATING).contains(&stars) {
            return Err(EngagementError::InvalidRating(stars));
        }
        let mut ratings: BTreeMap<String, u8> = self.read_map(&self.ratings_key);
        ratings.insert(slug.to_string(), stars);
        write_map(&mut self.storage, &self.ratings_key, &ratings)?;

        info!(
            "event=project_rate module=engagement status=ok stars={}",
            stars
        );
        Ok(())
    }

    /// Current rating for `slug`, `0` when unrated.
    pub fn rating(&self, slug: &str) -> u8 {
        let ratings: BTreeMap<String, u8> = self.read_map(&self.ratings_key);
        ratings.get(slug).copied().unwrap_or(0)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn read_map<V: DeserializeOwned>(&self, key: &str) -> BTreeMap<String, V> {
        let bytes = match self.storage.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return BTreeMap::new(),
            Err(err) => {
                warn!(
                    "event=engagement_read module=engagement status=warn key={} error={}",
                    key, err
                );
                return BTreeMap::new();
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            warn!(
                "event=engagement_read module=engagement status=warn key={} error_code=parse_failed error={}",
                key, err
            );
            BTreeMap::new()
        })
    }
}

fn write_map<S: KeyValueStore, V: Serialize>(
    storage: &mut S,
    key: &str,
    map: &BTreeMap<String, V>,
) -> Result<(), EngagementError> {
    let payload =
        serde_json::to_vec(map).map_err(|err| EngagementError::Serialization(err.to_string()))?;
    storage.set(key, &payload)?;
    Ok(())
}

fn require_slug(slug: &str) -> Result<&str, EngagementError> {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        return Err(EngagementError::EmptySlug);
    }
    Ok(trimmed)
}
