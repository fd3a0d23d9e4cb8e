//! Versioned universe store and lock primitives.

use crate::error::{FlotillaError, Result};
use crate::model::Universe;
use crate::types::UniverseId;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory store of universes with optimistic-concurrency writes.
///
/// `update_and_save` is the single mutation entry point: it loads a
/// snapshot, runs the caller's updater on it, then commits conditioned on
/// the version being unchanged since load. Every successful commit
/// advances the version by exactly 1. The updater runs outside any store
/// lock, so a conflicting writer that commits in between is detected at
/// commit time and surfaces as `ConcurrentModification` with nothing
/// applied.
#[derive(Debug, Default)]
pub struct UniverseStore {
    inner: RwLock<HashMap<UniverseId, Universe>>,
}

impl UniverseStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly provisioned universe.
    ///
    /// # Errors
    /// Returns `EntityExists` if the identity is already present.
    pub fn create(&self, universe: Universe) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.contains_key(&universe.id) {
            return Err(FlotillaError::EntityExists {
                id: universe.id.to_string(),
            });
        }
        inner.insert(universe.id, universe);
        Ok(())
    }

    /// Get a snapshot of a universe, if present.
    pub fn maybe_get(&self, id: UniverseId) -> Option<Universe> {
        self.inner.read().get(&id).cloned()
    }

    /// Get a snapshot of a universe.
    ///
    /// # Errors
    /// Returns `UniverseNotFound` if the identity is unknown.
    pub fn get(&self, id: UniverseId) -> Result<Universe> {
        self.maybe_get(id)
            .ok_or(FlotillaError::UniverseNotFound { universe: id })
    }

    /// Load, mutate and conditionally save a universe.
    ///
    /// The updater may mutate the descriptor freely; the version counter
    /// is owned by the store and set to `loaded + 1` at commit. If the
    /// updater returns an error the whole operation aborts with no commit
    /// and no version change.
    ///
    /// # Errors
    /// - `UniverseNotFound` if the identity is unknown
    /// - `ConcurrentModification` if another writer committed between
    ///   load and save
    /// - any error returned by the updater, unchanged
    pub fn update_and_save<F>(&self, id: UniverseId, updater: F) -> Result<Universe>
    where
        F: FnOnce(&mut Universe) -> Result<()>,
    {
        let mut snapshot = self.get(id)?;
        let loaded = snapshot.version;

        updater(&mut snapshot)?;

        let mut inner = self.inner.write();
        let stored = inner
            .get_mut(&id)
            .ok_or(FlotillaError::UniverseNotFound { universe: id })?;
        if stored.version != loaded {
            return Err(FlotillaError::ConcurrentModification {
                universe: id,
                loaded,
                stored: stored.version,
            });
        }
        snapshot.version = loaded + 1;
        *stored = snapshot.clone();
        tracing::debug!(universe = %id, version = snapshot.version, "committed universe update");
        Ok(snapshot)
    }

    /// Acquire the mutual-exclusion lock on a universe.
    ///
    /// One versioned write setting `locked` and `update_in_progress`.
    /// A failed acquisition changes nothing, including the version.
    ///
    /// # Errors
    /// Returns `AlreadyLocked` if another task holds the universe.
    pub fn acquire_lock(&self, id: UniverseId) -> Result<Universe> {
        let locked = self.update_and_save(id, |u| {
            if u.locked {
                return Err(FlotillaError::AlreadyLocked { universe: id });
            }
            u.locked = true;
            u.details.update_in_progress = true;
            Ok(())
        })?;
        tracing::info!(universe = %id, "lock acquired");
        Ok(locked)
    }

    /// Release the mutual-exclusion lock, recording the outcome of the
    /// finished mutation attempt.
    ///
    /// One versioned write clearing `locked` and `update_in_progress` and
    /// setting `update_succeeded`.
    ///
    /// # Errors
    /// Returns `NotLocked` if the universe holds no lock.
    pub fn release_lock(&self, id: UniverseId, succeeded: bool) -> Result<Universe> {
        let released = self.update_and_save(id, |u| {
            if !u.locked {
                return Err(FlotillaError::NotLocked { universe: id });
            }
            u.locked = false;
            u.details.update_in_progress = false;
            u.details.update_succeeded = succeeded;
            Ok(())
        })?;
        tracing::info!(universe = %id, succeeded, "lock released");
        Ok(released)
    }
}
