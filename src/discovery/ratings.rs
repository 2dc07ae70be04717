use super::types::RatingSummary;
use crate::catalog::store::{RatingStore, StoreError};
use crate::catalog::types::RecipeId;

use std::sync::Arc;

/// Derives `(average, count)` for a recipe from its individual ratings.
pub struct RatingAggregator {
    store: Arc<dyn RatingStore>,
}

impl RatingAggregator {
    pub fn new(store: Arc<dyn RatingStore>) -> Self {
        Self { store }
    }

    /// Plain arithmetic mean over every rating of the recipe. Read only.
    pub fn summarize(&self, recipe: RecipeId) -> Result<RatingSummary, StoreError> {
        let values = self.store.ratings_for_recipe(recipe)?;
        Ok(RatingSummary::from_values(&values))
    }
}
