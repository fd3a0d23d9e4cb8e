//! Cross-cluster replication config and its status lifecycle.

use crate::error::{FlotillaError, Result};
use crate::types::{UniverseId, XClusterId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Status lifecycle of a replication config.
///
/// ```text
///            setup ok            delete ok
///   Init ──────────────▶ Running ──────────▶ Deleted (record removed)
///     │                   │  ▲                  ▲
///     │ task fails        │  │ repair ok        │ delete ok
///     ▼                   ▼  │                  │
///   Failed ◀──────────────┘  └──────────── Failed
/// ```
///
/// Deletion from `Init` is rejected outright; the attempt is recorded by
/// moving the config to `Failed` without removing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XClusterStatus {
    /// Setup requested, not yet confirmed on the target cluster.
    Init,
    /// Replication is active.
    Running,
    /// The last managing task did not complete.
    Failed,
    /// Teardown confirmed; the record is pending physical removal.
    Deleted,
}

impl XClusterStatus {
    /// Check whether the lifecycle permits moving from `self` to `to`.
    #[must_use]
    pub fn can_transition(self, to: XClusterStatus) -> bool {
        use XClusterStatus::{Deleted, Failed, Init, Running};
        matches!(
            (self, to),
            (Init, Running)
                | (Init, Failed)
                | (Running, Failed)
                | (Failed, Running)
                | (Running, Deleted)
                | (Failed, Deleted)
        )
    }
}

impl fmt::Display for XClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "Init",
            Self::Running => "Running",
            Self::Failed => "Failed",
            Self::Deleted => "Deleted",
        };
        f.write_str(name)
    }
}

/// A cross-cluster replication config.
///
/// Status transitions are driven only by the owning task, through
/// [`XClusterStore::update_status`](crate::store::XClusterStore::update_status).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XClusterConfig {
    /// Config identity.
    pub id: XClusterId,
    /// Human-readable name, unique per source/target pair.
    pub name: String,
    /// Universe the replicated tables originate from.
    pub source_universe: UniverseId,
    /// Universe the tables are replicated to.
    pub target_universe: UniverseId,
    /// Identifiers of the replicated tables.
    pub tables: BTreeSet<String>,
    /// Current lifecycle status.
    pub status: XClusterStatus,
}

impl XClusterConfig {
    /// Create a config in the given initial status.
    pub fn new(
        name: impl Into<String>,
        source_universe: UniverseId,
        target_universe: UniverseId,
        tables: BTreeSet<String>,
        status: XClusterStatus,
    ) -> Self {
        Self {
            id: XClusterId::new(),
            name: name.into(),
            source_universe,
            target_universe,
            tables,
            status,
        }
    }

    /// The replication group name used on the wire: the source universe
    /// UUID joined with the config name.
    #[must_use]
    pub fn replication_group_name(&self) -> String {
        format!("{}_{}", self.source_universe.as_uuid(), self.name)
    }

    /// Validate and apply a status transition in place.
    ///
    /// # Errors
    /// Returns `IllegalStateTransition` when the lifecycle does not permit
    /// the move.
    pub fn transition(&mut self, to: XClusterStatus) -> Result<()> {
        if !self.status.can_transition(to) {
            return Err(FlotillaError::IllegalStateTransition {
                config: self.id,
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(status: XClusterStatus) -> XClusterConfig {
        XClusterConfig::new(
            "repl-1",
            UniverseId::new(),
            UniverseId::new(),
            BTreeSet::from(["000030af000030008000000000004000".to_string()]),
            status,
        )
    }

    #[test]
    fn lifecycle_matrix() {
        use XClusterStatus::{Deleted, Failed, Init, Running};
        assert!(Init.can_transition(Running));
        assert!(Init.can_transition(Failed));
        assert!(Running.can_transition(Failed));
        assert!(Failed.can_transition(Running));
        assert!(Running.can_transition(Deleted));
        assert!(Failed.can_transition(Deleted));

        assert!(!Init.can_transition(Deleted));
        assert!(!Deleted.can_transition(Running));
        assert!(!Running.can_transition(Init));
        assert!(!Failed.can_transition(Init));
    }

    #[test]
    fn transition_rejects_delete_from_init() {
        let mut cfg = config(XClusterStatus::Init);
        let err = cfg.transition(XClusterStatus::Deleted).unwrap_err();
        assert_eq!(err.code(), "E302");
        // Rejected transition leaves the status untouched.
        assert_eq!(cfg.status, XClusterStatus::Init);
    }

    #[test]
    fn transition_applies_valid_move() {
        let mut cfg = config(XClusterStatus::Init);
        cfg.transition(XClusterStatus::Running).unwrap();
        assert_eq!(cfg.status, XClusterStatus::Running);
    }

    #[test]
    fn replication_group_name_joins_source_and_name() {
        let cfg = config(XClusterStatus::Running);
        let group = cfg.replication_group_name();
        assert!(group.starts_with(&cfg.source_universe.as_uuid().to_string()));
        assert!(group.ends_with("_repl-1"));
    }
}
