use crate::catalog::store::{Sort, SortDirection};
use crate::catalog::types::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw query parameters of a discovery request, before validation.
///
/// Every field is kept as text so a malformed value is reported against its
/// field name instead of failing query extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub category: Option<String>,
    pub cheap: Option<String>,
    pub quick: Option<String>,
    pub difficulty_level: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

/// Average and count of one recipe's ratings, computed on demand.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// `None` when nobody has rated the recipe yet.
    pub average_rating: Option<f64>,
    pub count: usize,
}

impl RatingSummary {
    pub fn from_values(values: &[u8]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
        Self {
            average_rating: Some(sum as f64 / values.len() as f64),
            count: values.len(),
        }
    }

    /// Numeric average for ranking, where "not rated" counts as 0.
    pub fn average_or_zero(&self) -> f64 {
        self.average_rating.unwrap_or(0.0)
    }
}

/// A candidate together with its popularity score for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecipe {
    pub recipe: Recipe,
    pub rating: RatingSummary,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    pub price: f64,
    pub duration: u32,
    pub difficulty_level: DifficultyLevel,
    pub category: Category,
    pub average_rating: Option<f64>,
    pub rating_count: usize,
    pub is_favorite: bool,
}

impl RecipeSummary {
    /// The one projection from the read model to the response shape.
    pub fn project(recipe: &Recipe, rating: RatingSummary, is_favorite: bool) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            price: recipe.price,
            duration: recipe.duration,
            difficulty_level: recipe.difficulty_level,
            category: recipe.category,
            average_rating: rating.average_rating,
            rating_count: rating.count,
            is_favorite,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    pub view_count: u64,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub page: usize,
    pub size: usize,
}

impl<T> Page<T> {
    pub fn empty(page: usize, size: usize) -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            page,
            size,
        }
    }
}

/// Body of both recipe creation and recipe update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub name: String,
    pub price: f64,
    pub duration: i64,
    pub difficulty_level: String,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateRequest {
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub recipe_id: RecipeId,
    pub value: u8,
    pub summary: RatingSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub recipe_id: RecipeId,
    pub is_favorite: bool,
}

/// Ordering requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// In-memory popularity ranking over the whole candidate set.
    Popular(SortDirection),
    /// Ordering and paging delegated to storage.
    Storage(Sort),
}
