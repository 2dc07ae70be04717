//! Storage Collaborator Contracts
//!
//! The discovery core never owns persistence. It talks to storage through the
//! three traits below, each keyed by identifiers only, so every component can
//! fetch exactly what it needs without an object graph.
//!
//! All reads are synchronous request/response calls. Nothing here hands out
//! long-lived locks, and no call is retried: failures surface as `StoreError`.

use super::types::*;

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not serve the call (connection loss, timeout...).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("recipe {0} not found")]
    MissingRecipe(RecipeId),
}

/// Storage-level filter. Every `None` field imposes no constraint; present
/// fields are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePredicate {
    pub category: Option<Category>,
    pub max_price: Option<f64>,
    pub max_duration: Option<u32>,
    pub difficulty_level: Option<DifficultyLevel>,
    /// Restricts the result to one user's recipes.
    pub owner: Option<UserId>,
}

impl RecipePredicate {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.category.map_or(true, |c| recipe.category == c)
            && self.max_price.map_or(true, |max| recipe.price <= max)
            && self.max_duration.map_or(true, |max| recipe.duration <= max)
            && self
                .difficulty_level
                .map_or(true, |d| recipe.difficulty_level == d)
            && self.owner.as_ref().map_or(true, |o| recipe.owner_id == *o)
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Recipe attributes storage knows how to order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    Name,
    Price,
    Duration,
    ViewCount,
    DifficultyLevel,
    Category,
    Id,
}

impl SortKey {
    const NAMES: [(&'static str, SortKey); 8] = [
        ("createdAt", SortKey::CreatedAt),
        ("name", SortKey::Name),
        ("price", SortKey::Price),
        ("duration", SortKey::Duration),
        ("viewCount", SortKey::ViewCount),
        ("difficultyLevel", SortKey::DifficultyLevel),
        ("category", SortKey::Category),
        ("id", SortKey::Id),
    ];

    /// Ascending comparison on this attribute alone.
    pub fn compare(&self, a: &Recipe, b: &Recipe) -> Ordering {
        match self {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::Duration => a.duration.cmp(&b.duration),
            SortKey::ViewCount => a.view_count.cmp(&b.view_count),
            SortKey::DifficultyLevel => a.difficulty_level.cmp(&b.difficulty_level),
            SortKey::Category => a.category.cmp(&b.category),
            SortKey::Id => a.id.cmp(&b.id),
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, key)| *key)
            .ok_or_else(|| UnknownVariant {
                kind: "sort key",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Orients an ascending ordering.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            d if d.eq_ignore_ascii_case("ASC") => Ok(SortDirection::Asc),
            d if d.eq_ignore_ascii_case("DESC") => Ok(SortDirection::Desc),
            _ => Err(UnknownVariant {
                kind: "direction",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// How much of a filtered result storage should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pageable {
    /// One page ordered by `sort`. Equal sort values come back in an
    /// unspecified order.
    Paged { page: usize, size: usize, sort: Sort },
    /// The whole filtered set in storage's natural order.
    Unpaged,
}

/// A window of a filtered result together with the size of the whole result.
#[derive(Debug, Clone, Default)]
pub struct Slice {
    pub content: Vec<Recipe>,
    pub total: usize,
}

pub trait RecipeStore: Send + Sync {
    fn find_filtered(
        &self,
        predicate: &RecipePredicate,
        pageable: &Pageable,
    ) -> Result<Slice, StoreError>;

    fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError>;

    fn insert_recipe(
        &self,
        recipe: NewRecipe,
        created_at: DateTime<Utc>,
    ) -> Result<Recipe, StoreError>;

    /// Replaces the editable attributes and returns the stored result.
    fn update_recipe(&self, id: RecipeId, update: RecipeUpdate) -> Result<Recipe, StoreError>;

    /// Removes the recipe together with its ratings and favorites.
    fn delete_recipe(&self, id: RecipeId) -> Result<bool, StoreError>;

    /// Atomically adds one view and returns the new count.
    fn increment_view_count(&self, id: RecipeId) -> Result<u64, StoreError>;
}

pub trait RatingStore: Send + Sync {
    /// All rating values for one recipe, at most one per user.
    fn ratings_for_recipe(&self, recipe: RecipeId) -> Result<Vec<u8>, StoreError>;

    /// Creates the user's rating or replaces the one they gave before.
    fn upsert_rating(&self, user: &UserId, recipe: RecipeId, value: u8)
        -> Result<(), StoreError>;
}

pub trait FavoriteStore: Send + Sync {
    fn favorite_exists(&self, user: &UserId, recipe: RecipeId) -> Result<bool, StoreError>;

    /// Returns `false` if the recipe was already a favorite.
    fn add_favorite(&self, user: &UserId, recipe: RecipeId) -> Result<bool, StoreError>;

    /// Returns `false` if the recipe was not a favorite.
    fn remove_favorite(&self, user: &UserId, recipe: RecipeId) -> Result<bool, StoreError>;

    fn favorites_of(&self, user: &UserId) -> Result<Vec<RecipeId>, StoreError>;
}
