use crate::catalog::store::{FavoriteStore, StoreError};
use crate::catalog::types::{RecipeId, UserId};

use std::sync::Arc;

pub struct FavoriteResolver {
    store: Arc<dyn FavoriteStore>,
}

impl FavoriteResolver {
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self { store }
    }

    /// Anonymous viewers never see a favorite; storage is not consulted for them.
    pub fn is_favorite(
        &self,
        recipe: RecipeId,
        viewer: Option<&UserId>,
    ) -> Result<bool, StoreError> {
        match viewer {
            Some(user) => self.store.favorite_exists(user, recipe),
            None => Ok(false),
        }
    }
}
