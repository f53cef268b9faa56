//! Favorite read/toggle operations over an injectable store.

use std::sync::Arc;

use serde::Serialize;

use crate::favorites::store::{FavoriteStore, StoreError};

/// Favorite state of one prompt for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub prompt_id: String,
    pub is_favorite: bool,
}

#[derive(Clone)]
pub struct FavoriteService {
    store: Arc<dyn FavoriteStore>,
}

impl FavoriteService {
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self { store }
    }

    /// Current status. Never mutates the store.
    pub fn get_status(&self, user_key: &str, prompt_id: &str) -> Result<FavoriteStatus, StoreError> {
        let is_favorite = self.store.is_favorite(user_key, prompt_id)?;
        Ok(FavoriteStatus {
            prompt_id: prompt_id.to_string(),
            is_favorite,
        })
    }

    /// Flip the status and return the post-toggle value.
    pub fn toggle_status(&self, user_key: &str, prompt_id: &str) -> Result<FavoriteStatus, StoreError> {
        let is_favorite = self.store.toggle(user_key, prompt_id)?;
        tracing::debug!(user_key = %user_key, prompt_id = %prompt_id, is_favorite, "Favorite toggled");
        Ok(FavoriteStatus {
            prompt_id: prompt_id.to_string(),
            is_favorite,
        })
    }
}
