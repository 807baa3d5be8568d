//! Favorites
//!
//! Client-local set of favorite movie ids. Persistence is best effort: a
//! storage failure is logged and never blocks the UI.

use std::collections::BTreeSet;

use crate::models::{Movie, MovieId};

/// Local storage key holding the JSON id array
pub const FAVORITES_KEY: &str = "cine.favorites";

/// Key/value persistence for the favorites JSON
pub trait FavoriteStorage {
    fn load(&self) -> Result<Option<String>, String>;
    fn save(&self, json: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<MovieId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let ids: Vec<MovieId> = serde_json::from_str(json)?;
        Ok(Self { ids: ids.into_iter().collect() })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.ids)
    }

    /// Load from storage; anything unreadable yields an empty set
    pub fn load(storage: &dyn FavoriteStorage) -> Self {
        match storage.load() {
            Ok(Some(json)) => Self::from_json(&json).unwrap_or_else(|err| {
                log::warn!("[FAVORITES] Ignoring unreadable favorites: {}", err);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("[FAVORITES] Storage unavailable: {}", err);
                Self::default()
            }
        }
    }

    pub fn persist(&self, storage: &dyn FavoriteStorage) {
        let result = self.to_json().map_err(|e| e.to_string()).and_then(|json| storage.save(&json));
        if let Err(err) = result {
            log::warn!("[FAVORITES] Could not save favorites: {}", err);
        }
    }

    /// Flip membership, returning whether `id` is now a favorite
    pub fn toggle(&mut self, id: &MovieId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn remove(&mut self, id: &MovieId) -> bool {
        self.ids.remove(id)
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Favorite movies from `movies`, in catalog order
    pub fn select<'a>(&self, movies: &'a [Movie]) -> Vec<&'a Movie> {
        movies.iter().filter(|movie| self.contains(&movie.id)).collect()
    }
}
