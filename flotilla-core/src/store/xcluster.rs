//! Keyed store for cross-cluster replication configs.

use crate::error::{FlotillaError, Result};
use crate::model::{XClusterConfig, XClusterStatus};
use crate::types::{UniverseId, XClusterId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory store of replication configs.
///
/// Status changes go through [`update_status`](Self::update_status), which
/// enforces the lifecycle matrix; physical removal requires the config to
/// have been marked `Deleted` first.
#[derive(Debug, Default)]
pub struct XClusterStore {
    inner: RwLock<HashMap<XClusterId, XClusterConfig>>,
}

impl XClusterStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a replication config.
    ///
    /// # Errors
    /// Returns `EntityExists` if the identity is already present.
    pub fn insert(&self, config: XClusterConfig) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.contains_key(&config.id) {
            return Err(FlotillaError::EntityExists {
                id: config.id.to_string(),
            });
        }
        inner.insert(config.id, config);
        Ok(())
    }

    /// Get a snapshot of a config, if present.
    pub fn maybe_get(&self, id: XClusterId) -> Option<XClusterConfig> {
        self.inner.read().get(&id).cloned()
    }

    /// Get a snapshot of a config.
    ///
    /// # Errors
    /// Returns `XClusterNotFound` if the identity is unknown.
    pub fn get(&self, id: XClusterId) -> Result<XClusterConfig> {
        self.maybe_get(id)
            .ok_or(FlotillaError::XClusterNotFound { config: id })
    }

    /// Find a config by source universe and name.
    pub fn find_by_name(&self, source: UniverseId, name: &str) -> Option<XClusterConfig> {
        self.inner
            .read()
            .values()
            .find(|c| c.source_universe == source && c.name == name)
            .cloned()
    }

    /// Apply a transition-checked status change.
    ///
    /// # Errors
    /// - `XClusterNotFound` if the identity is unknown
    /// - `IllegalStateTransition` if the lifecycle forbids the move
    pub fn update_status(&self, id: XClusterId, to: XClusterStatus) -> Result<XClusterConfig> {
        let mut inner = self.inner.write();
        let config = inner
            .get_mut(&id)
            .ok_or(FlotillaError::XClusterNotFound { config: id })?;
        config.transition(to)?;
        tracing::info!(config = %id, status = %to, "replication config status updated");
        Ok(config.clone())
    }

    /// Physically remove a config that has been marked `Deleted`.
    ///
    /// # Errors
    /// - `XClusterNotFound` if the identity is unknown
    /// - `IllegalStateTransition` if the config is not in `Deleted`
    pub fn remove(&self, id: XClusterId) -> Result<XClusterConfig> {
        let mut inner = self.inner.write();
        let config = inner
            .get(&id)
            .ok_or(FlotillaError::XClusterNotFound { config: id })?;
        if config.status != XClusterStatus::Deleted {
            return Err(FlotillaError::IllegalStateTransition {
                config: id,
                from: config.status.to_string(),
                to: "removed".to_string(),
            });
        }
        let removed = inner.remove(&id).expect("checked above");
        tracing::info!(config = %id, "replication config removed");
        Ok(removed)
    }
}
