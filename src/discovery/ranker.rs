//! Recipe Ranker / Paginator
//!
//! Answers "which recipes, in what order" for one discovery request.
//!
//! ## Flow
//! 1. **Validate**: parameters are parsed into a `DiscoveryQuery`. Any bad value
//!    fails the request before storage is touched.
//! 2. **Branch**:
//!    - Attribute sorts (`createdAt`, `price`, ...) hand ordering and paging to
//!      storage. Equal values come back in an unspecified order.
//!    - `popular` pulls the entire filtered candidate set, scores every
//!      candidate against the maxima of that set, sorts by score (ties by id
//!      ascending) and slices the requested page in memory.
//! 3. **Decorate**: each returned recipe gets its rating summary and the
//!    viewer's favorite flag.
//!
//! Ratings, views and the candidate set are read in separate calls, so a
//! response can mix slightly stale and slightly fresh signals. Any failed read
//! aborts the whole response; a recipe is never silently treated as unrated.

use super::config::DiscoveryConfig;
use super::error::DiscoveryError;
use super::favorites::FavoriteResolver;
use super::filter::{parse_optional, FilterPredicateBuilder};
use super::ratings::RatingAggregator;
use super::scorer::{CandidateMaxima, PopularityScorer, PopularitySignals};
use super::types::*;
use crate::catalog::store::*;
use crate::catalog::types::{Recipe, UserId};

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// `sortBy` value selecting popularity ranking.
pub const POPULAR: &str = "popular";

/// A validated discovery request.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryQuery {
    pub predicate: RecipePredicate,
    pub sort: SortMode,
    pub page: usize,
    pub size: usize,
}

pub struct Ranker {
    recipes: Arc<dyn RecipeStore>,
    ratings: RatingAggregator,
    favorites: FavoriteResolver,
    filters: FilterPredicateBuilder,
    scorer: PopularityScorer,
    config: DiscoveryConfig,
}

impl Ranker {
    pub fn new(
        recipes: Arc<dyn RecipeStore>,
        ratings: Arc<dyn RatingStore>,
        favorites: Arc<dyn FavoriteStore>,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            recipes,
            ratings: RatingAggregator::new(ratings),
            favorites: FavoriteResolver::new(favorites),
            filters: FilterPredicateBuilder::new(&config),
            scorer: PopularityScorer::new(&config),
            config,
        }
    }

    pub fn scorer(&self) -> &PopularityScorer {
        &self.scorer
    }

    pub fn parse_query(&self, params: &FilterParams) -> Result<DiscoveryQuery, DiscoveryError> {
        let predicate = self.filters.build(params)?;

        let page = match parse_optional::<i64>(params.page.as_deref(), "page")? {
            None => 0,
            Some(p) if p < 0 => {
                return Err(DiscoveryError::validation("page", "must not be negative"))
            }
            Some(p) => usize::try_from(p)
                .map_err(|_| DiscoveryError::validation("page", "out of range"))?,
        };

        let size = match parse_optional::<i64>(params.size.as_deref(), "size")? {
            None => self.config.default_page_size,
            Some(s) if s <= 0 => {
                return Err(DiscoveryError::validation("size", "must be greater than 0"))
            }
            Some(s) => match usize::try_from(s) {
                Ok(s) if s <= self.config.max_page_size => s,
                _ => {
                    return Err(DiscoveryError::validation(
                        "size",
                        format!("must not exceed {}", self.config.max_page_size),
                    ))
                }
            },
        };

        let direction = match non_blank(params.direction.as_deref()) {
            None => SortDirection::Desc,
            Some(d) => d
                .parse()
                .map_err(|e| DiscoveryError::validation("direction", format!("{e}")))?,
        };

        let sort = match non_blank(params.sort_by.as_deref()) {
            None => SortMode::Storage(Sort {
                key: SortKey::CreatedAt,
                direction,
            }),
            Some(key) if key.eq_ignore_ascii_case(POPULAR) => SortMode::Popular(direction),
            Some(key) => SortMode::Storage(Sort {
                key: key
                    .parse()
                    .map_err(|e| DiscoveryError::validation("sortBy", format!("{e}")))?,
                direction,
            }),
        };

        Ok(DiscoveryQuery {
            predicate,
            sort,
            page,
            size,
        })
    }

    pub fn rank(
        &self,
        params: &FilterParams,
        viewer: Option<&UserId>,
    ) -> Result<Page<RecipeSummary>, DiscoveryError> {
        self.rank_at(params, viewer, Utc::now())
    }

    /// Same as `rank`, with the clock pinned to `now` for freshness.
    pub fn rank_at(
        &self,
        params: &FilterParams,
        viewer: Option<&UserId>,
        now: DateTime<Utc>,
    ) -> Result<Page<RecipeSummary>, DiscoveryError> {
        let query = self.parse_query(params)?;
        self.execute(query, viewer, now)
    }

    /// Ranks only the recipes owned by `owner`, who is also the viewer.
    /// Accepts the same paging and sort parameters as `rank`.
    pub fn rank_owned_by(
        &self,
        params: &FilterParams,
        owner: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Page<RecipeSummary>, DiscoveryError> {
        let mut query = self.parse_query(params)?;
        query.predicate.owner = Some(owner.clone());
        self.execute(query, Some(owner), now)
    }

    fn execute(
        &self,
        query: DiscoveryQuery,
        viewer: Option<&UserId>,
        now: DateTime<Utc>,
    ) -> Result<Page<RecipeSummary>, DiscoveryError> {
        tracing::debug!(
            "Ranking page {} (size {}) with {:?}, filters {:?}",
            query.page,
            query.size,
            query.sort,
            query.predicate
        );

        let page = match query.sort {
            SortMode::Storage(sort) => self.rank_by_storage(&query, sort, viewer)?,
            SortMode::Popular(direction) => {
                self.rank_by_popularity(&query, direction, viewer, now)?
            }
        };

        tracing::debug!(
            "Returning {} of {} recipes",
            page.content.len(),
            page.total_elements
        );
        Ok(page)
    }

    fn rank_by_storage(
        &self,
        query: &DiscoveryQuery,
        sort: Sort,
        viewer: Option<&UserId>,
    ) -> Result<Page<RecipeSummary>, DiscoveryError> {
        let pageable = Pageable::Paged {
            page: query.page,
            size: query.size,
            sort,
        };
        let slice = self.recipes.find_filtered(&query.predicate, &pageable)?;

        let content = slice
            .content
            .iter()
            .map(|recipe| self.summarize(recipe, viewer))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            content,
            total_elements: slice.total,
            page: query.page,
            size: query.size,
        })
    }

    fn rank_by_popularity(
        &self,
        query: &DiscoveryQuery,
        direction: SortDirection,
        viewer: Option<&UserId>,
        now: DateTime<Utc>,
    ) -> Result<Page<RecipeSummary>, DiscoveryError> {
        let candidates = self
            .recipes
            .find_filtered(&query.predicate, &Pageable::Unpaged)?
            .content;

        if candidates.is_empty() {
            return Ok(Page::empty(query.page, query.size));
        }

        let mut scored = self.score_candidates(candidates, now)?;
        sort_scored(&mut scored, direction);

        let total = scored.len();
        let start = query.page.saturating_mul(query.size).min(total);

        let content = scored
            .into_iter()
            .skip(start)
            .take(query.size)
            .map(|entry| {
                let is_favorite = self.favorites.is_favorite(entry.recipe.id, viewer)?;
                Ok(RecipeSummary::project(&entry.recipe, entry.rating, is_favorite))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(Page {
            content,
            total_elements: total,
            page: query.page,
            size: query.size,
        })
    }

    /// Scores a candidate set against its own maxima. Unordered.
    pub fn score_candidates(
        &self,
        candidates: Vec<Recipe>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoredRecipe>, StoreError> {
        let signals = candidates
            .iter()
            .map(|recipe| Ok(PopularitySignals::of(recipe, self.ratings.summarize(recipe.id)?)))
            .collect::<Result<Vec<_>, StoreError>>()?;

        let maxima = CandidateMaxima::over(&signals);

        Ok(candidates
            .into_iter()
            .zip(signals)
            .map(|(recipe, signals)| ScoredRecipe {
                score: self.scorer.score(&signals, &maxima, now),
                rating: signals.rating,
                recipe,
            })
            .collect())
    }

    /// The most recently created recipes, newest first.
    pub fn latest(&self, viewer: Option<&UserId>) -> Result<Vec<RecipeSummary>, DiscoveryError> {
        let pageable = Pageable::Paged {
            page: 0,
            size: self.config.latest_limit,
            sort: Sort {
                key: SortKey::CreatedAt,
                direction: SortDirection::Desc,
            },
        };
        let slice = self
            .recipes
            .find_filtered(&RecipePredicate::default(), &pageable)?;

        Ok(slice
            .content
            .iter()
            .map(|recipe| self.summarize(recipe, viewer))
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub fn summarize(
        &self,
        recipe: &Recipe,
        viewer: Option<&UserId>,
    ) -> Result<RecipeSummary, StoreError> {
        let rating = self.ratings.summarize(recipe.id)?;
        let is_favorite = self.favorites.is_favorite(recipe.id, viewer)?;
        Ok(RecipeSummary::project(recipe, rating, is_favorite))
    }

    pub fn details(
        &self,
        recipe: &Recipe,
        viewer: Option<&UserId>,
    ) -> Result<RecipeDetails, StoreError> {
        Ok(RecipeDetails {
            summary: self.summarize(recipe, viewer)?,
            view_count: recipe.view_count,
            owner_id: recipe.owner_id.clone(),
            created_at: recipe.created_at,
        })
    }
}

/// Orders by score in the requested direction; equal scores by id ascending.
pub fn sort_scored(scored: &mut [ScoredRecipe], direction: SortDirection) {
    scored.sort_by(|a, b| {
        direction
            .apply(a.score.total_cmp(&b.score))
            .then_with(|| a.recipe.id.cmp(&b.recipe.id))
    });
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
