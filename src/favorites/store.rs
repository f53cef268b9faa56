//! Favorite storage.
//!
//! The [`FavoriteStore`] trait is the seam between the API handlers and the
//! backing store. [`InMemoryFavoriteStore`] keeps everything in process
//! memory: nothing is persisted and a restart forgets every favorite.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

/// Failure inside a favorite store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("favorite store unavailable: {0}")]
    Unavailable(String),
}

/// Per-user sets of favorited prompt IDs.
pub trait FavoriteStore: Send + Sync {
    /// All favorites of `user_key`. Unknown users have none; no entry is created.
    fn favorites(&self, user_key: &str) -> Result<HashSet<String>, StoreError>;

    /// Whether `prompt_id` is in the user's set. Does not create an entry.
    fn is_favorite(&self, user_key: &str, prompt_id: &str) -> Result<bool, StoreError> {
        Ok(self.favorites(user_key)?.contains(prompt_id))
    }

    /// Flip membership of `prompt_id` and return the new membership.
    fn toggle(&self, user_key: &str, prompt_id: &str) -> Result<bool, StoreError>;
}

/// Process-local store backed by a concurrent map.
///
/// A toggle holds the shard lock of its user entry for the whole
/// read-modify-write, so concurrent toggles never lose updates.
#[derive(Clone, Default)]
pub struct InMemoryFavoriteStore {
    inner: Arc<DashMap<String, HashSet<String>>>,
}

impl InMemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with an entry.
    pub fn user_count(&self) -> usize {
        self.inner.len()
    }

    pub fn contains_user(&self, user_key: &str) -> bool {
        self.inner.contains_key(user_key)
    }
}

impl FavoriteStore for InMemoryFavoriteStore {
    fn favorites(&self, user_key: &str) -> Result<HashSet<String>, StoreError> {
        Ok(self
            .inner
            .get(user_key)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }

    fn is_favorite(&self, user_key: &str, prompt_id: &str) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .get(user_key)
            .is_some_and(|r| r.value().contains(prompt_id)))
    }

    fn toggle(&self, user_key: &str, prompt_id: &str) -> Result<bool, StoreError> {
        let added = {
            let mut set = self.inner.entry(user_key.to_string()).or_default();
            if set.remove(prompt_id) {
                false
            } else {
                set.insert(prompt_id.to_string());
                true
            }
        };
        // Re-checked under the shard lock, so a concurrent add survives.
        if !added {
            self.inner.remove_if(user_key, |_, set| set.is_empty());
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let store = InMemoryFavoriteStore::new();
        assert!(store.toggle("u1", "42").unwrap());
        assert!(store.is_favorite("u1", "42").unwrap());
        assert!(!store.toggle("u1", "42").unwrap());
        assert!(!store.is_favorite("u1", "42").unwrap());
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let store = InMemoryFavoriteStore::new();
        store.toggle("u1", "a").unwrap();
        let before = store.favorites("u1").unwrap();

        store.toggle("u1", "b").unwrap();
        store.toggle("u1", "b").unwrap();
        assert_eq!(store.favorites("u1").unwrap(), before);
    }

    #[test]
    fn test_reads_do_not_create_entries() {
        let store = InMemoryFavoriteStore::new();
        for _ in 0..3 {
            assert!(!store.is_favorite("ghost", "1").unwrap());
            assert!(store.favorites("ghost").unwrap().is_empty());
        }
        assert!(!store.contains_user("ghost"));
        assert_eq!(store.user_count(), 0);
    }

    #[test]
    fn test_emptied_users_are_dropped() {
        let store = InMemoryFavoriteStore::new();
        store.toggle("u1", "a").unwrap();
        store.toggle("u1", "b").unwrap();
        store.toggle("u1", "a").unwrap();
        assert!(store.contains_user("u1"));

        store.toggle("u1", "b").unwrap();
        assert!(!store.contains_user("u1"));
        assert_eq!(store.user_count(), 0);
    }

    #[test]
    fn test_users_are_isolated() {
        let store = InMemoryFavoriteStore::new();
        store.toggle("u1", "7").unwrap();
        assert!(!store.is_favorite("u2", "7").unwrap());
    }

    #[test]
    fn test_concurrent_toggles_do_not_lose_updates() {
        let store = InMemoryFavoriteStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        store.toggle("u1", "42").unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        // 8000 toggles: an even count returns to the starting state.
        assert!(!store.is_favorite("u1", "42").unwrap());
        assert_eq!(store.user_count(), 0);
    }
}
