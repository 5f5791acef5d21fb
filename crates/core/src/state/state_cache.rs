use dashmap::DashMap;
use log::debug;

use crate::identity::UserId;

use super::state_model::State;

/// Per-user cache of computed states.
///
/// Every write path calls [`StateCache::invalidate`] after it commits. A
/// generation counter per user guards against a slow computation that
/// started before the write from repopulating the cache with stale data:
/// readers capture [`StateCache::generation`] before reading the store and
/// only publish through [`StateCache::insert_if_current`].
#[derive(Debug, Default)]
pub struct StateCache {
    generations: DashMap<UserId, u64>,
    entries: DashMap<UserId, State>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &UserId) -> Option<State> {
        self.entries.get(user_id).map(|entry| entry.value().clone())
    }

    pub fn generation(&self, user_id: &UserId) -> u64 {
        self.generations.get(user_id).map(|g| *g).unwrap_or(0)
    }

    /// Stores `state` unless the user's data changed since `generation` was
    /// read. Returns whether the entry was stored.
    pub fn insert_if_current(&self, user_id: &UserId, generation: u64, state: State) -> bool {
        // Holding the generation entry blocks a concurrent invalidate.
        let current = self.generations.entry(user_id.clone()).or_insert(0);
        if *current != generation {
            debug!(
                "Discarding stale state for user {} (generation {} != {})",
                user_id, generation, *current
            );
            return false;
        }
        self.entries.insert(user_id.clone(), state);
        true
    }

    pub fn invalidate(&self, user_id: &UserId) {
        let mut current = self.generations.entry(user_id.clone()).or_insert(0);
        *current += 1;
        self.entries.remove(user_id);
    }
}
