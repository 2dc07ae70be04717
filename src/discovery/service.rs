//! Catalog Service
//!
//! The entry point request handlers talk to. Ranking goes through the
//! `Ranker`; the single-recipe read path records views; the small write paths
//! (create, update, rate, favorite, delete) validate their input and delegate
//! to the stores. The acting user is always an explicit `Option<&UserId>`.

use super::config::DiscoveryConfig;
use super::error::DiscoveryError;
use super::ranker::Ranker;
use super::types::*;
use super::views::ViewCounter;
use crate::catalog::memory::MemoryCatalog;
use crate::catalog::store::*;
use crate::catalog::types::*;

use chrono::{DateTime, Utc};
use std::sync::Arc;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

pub struct CatalogService {
    ranker: Ranker,
    views: ViewCounter,
    recipes: Arc<dyn RecipeStore>,
    ratings: Arc<dyn RatingStore>,
    favorites: Arc<dyn FavoriteStore>,
}

impl CatalogService {
    pub fn new(
        recipes: Arc<dyn RecipeStore>,
        ratings: Arc<dyn RatingStore>,
        favorites: Arc<dyn FavoriteStore>,
        config: DiscoveryConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            ranker: Ranker::new(recipes.clone(), ratings.clone(), favorites.clone(), config),
            views: ViewCounter::new(recipes.clone()),
            recipes,
            ratings,
            favorites,
        })
    }

    /// Wires every store role to one `MemoryCatalog`.
    pub fn in_memory(catalog: Arc<MemoryCatalog>, config: DiscoveryConfig) -> Arc<Self> {
        Self::new(catalog.clone(), catalog.clone(), catalog, config)
    }

    pub fn discover(
        &self,
        params: &FilterParams,
        viewer: Option<&UserId>,
    ) -> Result<Page<RecipeSummary>, DiscoveryError> {
        self.ranker.rank(params, viewer)
    }

    pub fn latest(&self, viewer: Option<&UserId>) -> Result<Vec<RecipeSummary>, DiscoveryError> {
        self.ranker.latest(viewer)
    }

    /// The viewer's own recipes, paged and sorted like a discovery request.
    pub fn own_recipes(
        &self,
        params: &FilterParams,
        viewer: Option<&UserId>,
    ) -> Result<Page<RecipeSummary>, DiscoveryError> {
        let owner = viewer.ok_or(DiscoveryError::Unauthorized)?;
        self.ranker.rank_owned_by(params, owner, Utc::now())
    }

    /// Fetches one recipe and counts the view unless the viewer owns it.
    pub fn view_recipe(
        &self,
        id: RecipeId,
        viewer: Option<&UserId>,
    ) -> Result<RecipeDetails, DiscoveryError> {
        let mut recipe = self.find(id)?;

        if let Some(count) = self.views.record_view(&recipe, viewer)? {
            recipe.view_count = count;
        }

        Ok(self.ranker.details(&recipe, viewer)?)
    }

    pub fn create_recipe(
        &self,
        request: RecipeRequest,
        viewer: Option<&UserId>,
        now: DateTime<Utc>,
    ) -> Result<RecipeDetails, DiscoveryError> {
        let owner = viewer.ok_or(DiscoveryError::Unauthorized)?;
        let recipe = validate_recipe(request)?.with_owner(owner.clone());

        let stored = self.recipes.insert_recipe(recipe, now)?;
        tracing::info!("User {} created recipe {} ({})", owner, stored.id, stored.name);

        Ok(self.ranker.details(&stored, viewer)?)
    }

    /// Only the owner may edit. Id, creation time, views and ratings are kept.
    pub fn update_recipe(
        &self,
        id: RecipeId,
        request: RecipeRequest,
        viewer: Option<&UserId>,
    ) -> Result<RecipeDetails, DiscoveryError> {
        let user = viewer.ok_or(DiscoveryError::Unauthorized)?;
        self.ensure_owner(id, user)?;
        let update = validate_recipe(request)?;

        let stored = self.recipes.update_recipe(id, update)?;
        tracing::info!("User {} updated recipe {}", user, id);

        Ok(self.ranker.details(&stored, viewer)?)
    }

    /// Only the owner may delete; ratings and favorites go with the recipe.
    pub fn delete_recipe(
        &self,
        id: RecipeId,
        viewer: Option<&UserId>,
    ) -> Result<(), DiscoveryError> {
        let user = viewer.ok_or(DiscoveryError::Unauthorized)?;
        self.ensure_owner(id, user)?;

        self.recipes.delete_recipe(id)?;
        tracing::info!("User {} deleted recipe {}", user, id);
        Ok(())
    }

    pub fn rate_recipe(
        &self,
        id: RecipeId,
        value: i64,
        viewer: Option<&UserId>,
    ) -> Result<RatingResponse, DiscoveryError> {
        let user = viewer.ok_or(DiscoveryError::Unauthorized)?;
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(DiscoveryError::validation(
                "value",
                format!("must be between {MIN_RATING} and {MAX_RATING}"),
            ));
        }
        // in range, so the narrowing is lossless
        let value = value as u8;

        self.ratings.upsert_rating(user, id, value)?;
        let values = self.ratings.ratings_for_recipe(id)?;

        Ok(RatingResponse {
            recipe_id: id,
            value,
            summary: RatingSummary::from_values(&values),
        })
    }

    pub fn set_favorite(
        &self,
        id: RecipeId,
        viewer: Option<&UserId>,
        favorite: bool,
    ) -> Result<FavoriteResponse, DiscoveryError> {
        let user = viewer.ok_or(DiscoveryError::Unauthorized)?;

        if favorite {
            self.favorites.add_favorite(user, id)?;
        } else {
            self.favorites.remove_favorite(user, id)?;
        }

        Ok(FavoriteResponse {
            recipe_id: id,
            is_favorite: favorite,
        })
    }

    pub fn favorites(&self, viewer: Option<&UserId>) -> Result<Vec<RecipeSummary>, DiscoveryError> {
        let user = viewer.ok_or(DiscoveryError::Unauthorized)?;

        let mut summaries = Vec::new();
        for id in self.favorites.favorites_of(user)? {
            if let Some(recipe) = self.recipes.get_recipe(id)? {
                summaries.push(self.ranker.summarize(&recipe, viewer)?);
            }
        }
        Ok(summaries)
    }

    fn find(&self, id: RecipeId) -> Result<Recipe, DiscoveryError> {
        self.recipes
            .get_recipe(id)?
            .ok_or_else(|| DiscoveryError::NotFound(format!("recipe {id} not found")))
    }

    fn ensure_owner(&self, id: RecipeId, user: &UserId) -> Result<(), DiscoveryError> {
        if self.find(id)?.owner_id != *user {
            return Err(DiscoveryError::Forbidden(format!(
                "you are not the owner of recipe {id}"
            )));
        }
        Ok(())
    }
}

fn validate_recipe(request: RecipeRequest) -> Result<RecipeUpdate, DiscoveryError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(DiscoveryError::validation("name", "is required"));
    }
    if !request.price.is_finite() || request.price <= 0.0 {
        return Err(DiscoveryError::validation("price", "must be greater than 0"));
    }
    let duration = u32::try_from(request.duration)
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| {
            DiscoveryError::validation("duration", "must be a positive number of minutes")
        })?;
    let difficulty_level = request
        .difficulty_level
        .parse::<DifficultyLevel>()
        .map_err(|e| DiscoveryError::validation("difficultyLevel", e.to_string()))?;
    let category = request
        .category
        .parse::<Category>()
        .map_err(|e| DiscoveryError::validation("category", e.to_string()))?;

    Ok(RecipeUpdate {
        name: name.to_string(),
        price: request.price,
        duration,
        difficulty_level,
        category,
    })
}
