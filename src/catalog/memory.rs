//! In-Memory Catalog Store
//!
//! A concurrent, process-local implementation of the storage traits backed by
//! `DashMap`. Ratings are kept as a map of maps (recipe -> user -> value), which
//! makes the one-rating-per-user rule structural rather than checked.
//!
//! View counting happens under the shard write lock of the recipe entry, so
//! concurrent increments never overwrite each other. Rating and favorite
//! writes hold a read guard on the recipe entry while they insert, so a delete
//! running at the same time cannot leave entries behind for a removed id.

use super::store::*;
use super::types::*;

use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicU64, Ordering};

pub struct MemoryCatalog {
    recipes: DashMap<RecipeId, Recipe>,
    ratings: DashMap<RecipeId, DashMap<UserId, u8>>,
    favorites: DashMap<UserId, DashSet<RecipeId>>,
    next_id: AtomicU64,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            recipes: DashMap::new(),
            ratings: DashMap::new(),
            favorites: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Stores a fully-formed recipe as is, keeping its id, timestamp and
    /// view count. Used to restore snapshots and to seed fixtures.
    pub fn load(&self, recipe: Recipe) {
        self.next_id.fetch_max(recipe.id.0 + 1, Ordering::SeqCst);
        self.recipes.insert(recipe.id, recipe);
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    pub fn rating_count(&self) -> usize {
        self.ratings.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.iter().map(|entry| entry.value().len()).sum()
    }

    fn filtered(&self, predicate: &RecipePredicate) -> Vec<Recipe> {
        self.recipes
            .iter()
            .filter(|entry| predicate.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore for MemoryCatalog {
    fn find_filtered(
        &self,
        predicate: &RecipePredicate,
        pageable: &Pageable,
    ) -> Result<Slice, StoreError> {
        let mut matching = self.filtered(predicate);
        let total = matching.len();

        match pageable {
            Pageable::Unpaged => {
                // natural order: insertion order, which is id order
                matching.sort_by_key(|r| r.id);
                Ok(Slice {
                    content: matching,
                    total,
                })
            }
            Pageable::Paged { page, size, sort } => {
                matching.sort_by(|a, b| {
                    sort.direction
                        .apply(sort.key.compare(a, b))
                        .then_with(|| a.id.cmp(&b.id))
                });
                let start = page.saturating_mul(*size).min(total);
                let content = matching.into_iter().skip(start).take(*size).collect();
                Ok(Slice { content, total })
            }
        }
    }

    fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError> {
        Ok(self.recipes.get(&id).map(|entry| entry.value().clone()))
    }

    fn insert_recipe(
        &self,
        recipe: NewRecipe,
        created_at: DateTime<Utc>,
    ) -> Result<Recipe, StoreError> {
        let id = RecipeId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = Recipe {
            id,
            name: recipe.name,
            price: recipe.price,
            duration: recipe.duration,
            difficulty_level: recipe.difficulty_level,
            category: recipe.category,
            view_count: 0,
            created_at,
            owner_id: recipe.owner_id,
        };

        self.recipes.insert(id, stored.clone());
        tracing::debug!("Stored recipe {} ({})", id, stored.name);
        Ok(stored)
    }

    fn update_recipe(&self, id: RecipeId, update: RecipeUpdate) -> Result<Recipe, StoreError> {
        let mut recipe = self
            .recipes
            .get_mut(&id)
            .ok_or(StoreError::MissingRecipe(id))?;
        update.apply_to(&mut recipe);

        tracing::debug!("Updated recipe {} ({})", id, recipe.name);
        Ok(recipe.clone())
    }

    fn delete_recipe(&self, id: RecipeId) -> Result<bool, StoreError> {
        if self.recipes.remove(&id).is_none() {
            return Ok(false);
        }

        self.ratings.remove(&id);
        for entry in self.favorites.iter() {
            entry.value().remove(&id);
        }

        tracing::debug!("Deleted recipe {} with its ratings and favorites", id);
        Ok(true)
    }

    fn increment_view_count(&self, id: RecipeId) -> Result<u64, StoreError> {
        let mut recipe = self
            .recipes
            .get_mut(&id)
            .ok_or(StoreError::MissingRecipe(id))?;
        recipe.view_count = recipe.view_count.saturating_add(1);
        Ok(recipe.view_count)
    }
}

impl RatingStore for MemoryCatalog {
    fn ratings_for_recipe(&self, recipe: RecipeId) -> Result<Vec<u8>, StoreError> {
        Ok(self
            .ratings
            .get(&recipe)
            .map(|by_user| by_user.iter().map(|entry| *entry.value()).collect())
            .unwrap_or_default())
    }

    fn upsert_rating(
        &self,
        user: &UserId,
        recipe: RecipeId,
        value: u8,
    ) -> Result<(), StoreError> {
        // the read guard keeps a concurrent delete from slipping in before the insert
        let _exists = self
            .recipes
            .get(&recipe)
            .ok_or(StoreError::MissingRecipe(recipe))?;

        self.ratings
            .entry(recipe)
            .or_default()
            .insert(user.clone(), value);
        Ok(())
    }
}

impl FavoriteStore for MemoryCatalog {
    fn favorite_exists(&self, user: &UserId, recipe: RecipeId) -> Result<bool, StoreError> {
        Ok(self
            .favorites
            .get(user)
            .is_some_and(|set| set.contains(&recipe)))
    }

    fn add_favorite(&self, user: &UserId, recipe: RecipeId) -> Result<bool, StoreError> {
        let _exists = self
            .recipes
            .get(&recipe)
            .ok_or(StoreError::MissingRecipe(recipe))?;

        Ok(self
            .favorites
            .entry(user.clone())
            .or_default()
            .insert(recipe))
    }

    fn remove_favorite(&self, user: &UserId, recipe: RecipeId) -> Result<bool, StoreError> {
        Ok(self
            .favorites
            .get(user)
            .is_some_and(|set| set.remove(&recipe).is_some()))
    }

    fn favorites_of(&self, user: &UserId) -> Result<Vec<RecipeId>, StoreError> {
        let mut ids: Vec<RecipeId> = self
            .favorites
            .get(user)
            .map(|set| set.iter().map(|id| *id).collect())
            .unwrap_or_default();
        ids.sort();
        Ok(ids)
    }
}
