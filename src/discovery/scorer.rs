//! Popularity Scorer
//!
//! Combines three signals into one scalar:
//!
//! ```text
//! rating_score     = average_rating * (rating_count / max_rating_count)
//! normalized_views = view_count / max_view_count
//! freshness        = max(0, 1 - days_since_created / window_days)
//!
//! score = w_rating * rating_score + w_views * normalized_views + w_freshness * freshness
//! ```
//!
//! Both maxima come from the filtered candidate set of the current request,
//! not from the whole catalog, so a recipe's score is relative to what the
//! viewer is looking at. Scores depend on the wall clock and are never cached.

use super::config::{DiscoveryConfig, PopularityWeights};
use super::types::RatingSummary;
use crate::catalog::types::Recipe;

use chrono::{DateTime, Utc};

/// Everything the scorer needs to know about one candidate.
#[derive(Debug, Clone, Copy)]
pub struct PopularitySignals {
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub rating: RatingSummary,
}

impl PopularitySignals {
    pub fn of(recipe: &Recipe, rating: RatingSummary) -> Self {
        Self {
            view_count: recipe.view_count,
            created_at: recipe.created_at,
            rating,
        }
    }
}

/// Request-scoped normalisation bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateMaxima {
    pub max_view_count: u64,
    pub max_rating_count: usize,
}

impl CandidateMaxima {
    pub fn over<'a>(signals: impl IntoIterator<Item = &'a PopularitySignals>) -> Self {
        signals
            .into_iter()
            .fold(Self::default(), |acc, s| Self {
                max_view_count: acc.max_view_count.max(s.view_count),
                max_rating_count: acc.max_rating_count.max(s.rating.count),
            })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PopularityScorer {
    weights: PopularityWeights,
    freshness_window_days: i64,
}

impl PopularityScorer {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            weights: config.weights,
            freshness_window_days: config.freshness_window_days,
        }
    }

    pub fn weights(&self) -> PopularityWeights {
        self.weights
    }

    /// A well-rated recipe with many ratings beats one with a single 5 star rating.
    pub fn rating_score(&self, rating: &RatingSummary, maxima: &CandidateMaxima) -> f64 {
        if maxima.max_rating_count == 0 {
            return 0.0;
        }
        rating.average_or_zero() * (rating.count as f64 / maxima.max_rating_count as f64)
    }

    pub fn normalized_views(&self, view_count: u64, maxima: &CandidateMaxima) -> f64 {
        if maxima.max_view_count == 0 {
            return 0.0;
        }
        view_count as f64 / maxima.max_view_count as f64
    }

    /// Linear decay from 1 on the creation day to 0 at the end of the window.
    /// Age is counted in whole days; timestamps in the future count as today.
    pub fn freshness(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        if self.freshness_window_days <= 0 {
            return 0.0;
        }
        let days = (now - created_at).num_days().max(0) as f64;
        (1.0 - days / self.freshness_window_days as f64).max(0.0)
    }

    pub fn score(
        &self,
        signals: &PopularitySignals,
        maxima: &CandidateMaxima,
        now: DateTime<Utc>,
    ) -> f64 {
        self.weights.rating * self.rating_score(&signals.rating, maxima)
            + self.weights.views * self.normalized_views(signals.view_count, maxima)
            + self.weights.freshness * self.freshness(signals.created_at, now)
    }
}
