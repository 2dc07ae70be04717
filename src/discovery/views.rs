use crate::catalog::store::{RecipeStore, StoreError};
use crate::catalog::types::{Recipe, UserId};

use std::sync::Arc;

/// Counts recipe views by anyone other than the owner.
///
/// The increment itself is delegated to the store's atomic
/// `increment_view_count`, so concurrent viewers never lose updates. The
/// write is independent of any ranking in flight.
pub struct ViewCounter {
    store: Arc<dyn RecipeStore>,
}

impl ViewCounter {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Returns the new count, or `None` if the owner looked at their own recipe.
    /// Anonymous viewers are counted.
    pub fn record_view(
        &self,
        recipe: &Recipe,
        viewer: Option<&UserId>,
    ) -> Result<Option<u64>, StoreError> {
        if viewer == Some(&recipe.owner_id) {
            return Ok(None);
        }

        let count = self.store.increment_view_count(recipe.id)?;
        tracing::trace!("Recipe {} now has {} views", recipe.id, count);
        Ok(Some(count))
    }
}
