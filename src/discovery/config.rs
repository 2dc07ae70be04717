//! Discovery Configuration
//!
//! Tier thresholds, paging limits and the popularity weights. Everything has a
//! compiled-in default; a few values can be overridden from the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

pub const W_RATING: f64 = 0.6;
pub const W_VIEWS: f64 = 0.2;
pub const W_FRESHNESS: f64 = 0.2;
pub const FRESHNESS_WINDOW_DAYS: i64 = 30;

/// `cheap=true` keeps recipes priced at or below this.
pub const CHEAP_PRICE_THRESHOLD: f64 = 10.0;
/// `quick=true` keeps recipes taking at most this many minutes.
pub const QUICK_DURATION_THRESHOLD: u32 = 30;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;
pub const LATEST_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PopularityWeights {
    pub rating: f64,
    pub views: f64,
    pub freshness: f64,
}

impl PopularityWeights {
    /// Upper bound of a popularity score: average rating tops out at 5, the
    /// other two signals at 1.
    pub fn max_score(&self) -> f64 {
        self.rating * 5.0 + self.views + self.freshness
    }
}

impl Default for PopularityWeights {
    fn default() -> Self {
        Self {
            rating: W_RATING,
            views: W_VIEWS,
            freshness: W_FRESHNESS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub cheap_price_threshold: f64,
    pub quick_duration_threshold: u32,
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub latest_limit: usize,
    pub weights: PopularityWeights,
    pub freshness_window_days: i64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            cheap_price_threshold: CHEAP_PRICE_THRESHOLD,
            quick_duration_threshold: QUICK_DURATION_THRESHOLD,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            latest_limit: LATEST_LIMIT,
            weights: PopularityWeights::default(),
            freshness_window_days: FRESHNESS_WINDOW_DAYS,
        }
    }
}

impl DiscoveryConfig {
    /// Defaults, overridden by `CATALOG_CHEAP_PRICE`, `CATALOG_QUICK_MINUTES`
    /// and `CATALOG_MAX_PAGE_SIZE` when those are set to valid values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cheap_price_threshold: env_or("CATALOG_CHEAP_PRICE", defaults.cheap_price_threshold),
            quick_duration_threshold: env_or(
                "CATALOG_QUICK_MINUTES",
                defaults.quick_duration_threshold,
            ),
            max_page_size: env_or("CATALOG_MAX_PAGE_SIZE", defaults.max_page_size).max(1),
            ..defaults
        }
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => {
            tracing::info!("{key} set to {value}");
            value
        }
        Err(e) => {
            tracing::warn!("Invalid {key} value '{raw}': {e}, using default {default}");
            default
        }
    }
}
