//! Universe: the managed cluster descriptor.
//!
//! A universe carries a monotonic `version` counter and the lock fields
//! that serialize mutating tasks. The descriptor itself (`UniverseDetails`)
//! holds node membership and per-cluster intent. Nothing in this module
//! writes state; all mutation is funneled through
//! [`UniverseStore::update_and_save`](crate::store::UniverseStore::update_and_save).

use crate::types::UniverseId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Network handle of one cluster member's administrative endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle {
    /// Hostname or address.
    pub host: String,
    /// Administrative RPC port.
    pub port: u16,
}

impl NodeHandle {
    /// Create a handle from host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One member node of a universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDetails {
    /// Node name, unique within the universe (e.g., "n1").
    pub name: String,
    /// Administrative endpoint of the node.
    pub admin: NodeHandle,
    /// Cloud provider code (e.g., "aws").
    pub provider: String,
    /// Region code (e.g., "us-west-2").
    pub region: String,
    /// Instance type / machine shape (e.g., "c5.large").
    pub instance_type: String,
    /// Whether this node runs the coordination process.
    pub is_master: bool,
    /// Whether this node runs the storage server process.
    pub is_tserver: bool,
}

/// Role of a cluster within a universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterType {
    /// The primary data cluster.
    Primary,
    /// An asynchronous read replica cluster.
    ReadReplica,
}

/// Desired shape of one cluster, as requested by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIntent {
    /// Cloud provider code.
    pub provider: String,
    /// Regions the cluster spans.
    pub regions: Vec<String>,
    /// Instance type for all nodes of the cluster.
    pub instance_type: String,
    /// Number of nodes.
    pub num_nodes: u32,
    /// Replication factor.
    pub replication_factor: u32,
}

/// One cluster of a universe (a universe has a primary cluster and may
/// have read replicas).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster identity within the universe.
    pub uuid: Uuid,
    /// Role of the cluster.
    pub cluster_type: ClusterType,
    /// Requested shape.
    pub user_intent: UserIntent,
}

/// The mutable descriptor embedded in a universe.
///
/// `update_in_progress` and `update_succeeded` track the operation window:
/// the first is raised for the lifetime of the owning task's lock, the
/// second reflects only the most recently completed mutation attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniverseDetails {
    /// Member nodes.
    pub nodes: Vec<NodeDetails>,
    /// Clusters (primary first).
    pub clusters: Vec<Cluster>,
    /// Raised while a mutating task holds the universe lock.
    pub update_in_progress: bool,
    /// Outcome of the most recently completed mutation attempt.
    pub update_succeeded: bool,
    /// Certificate reference for node-to-node TLS, if configured.
    pub root_ca: Option<Uuid>,
}

impl UniverseDetails {
    /// Nodes running the storage server process.
    pub fn tservers(&self) -> impl Iterator<Item = &NodeDetails> {
        self.nodes.iter().filter(|n| n.is_tserver)
    }

    /// Nodes running the coordination process.
    pub fn masters(&self) -> impl Iterator<Item = &NodeDetails> {
        self.nodes.iter().filter(|n| n.is_master)
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&NodeDetails> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

/// The managed cluster descriptor.
///
/// Invariants:
/// - `version` starts at 0 and advances by exactly 1 per committed write
/// - at most one in-flight task holds `locked == true` at any time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Universe {
    /// Universe identity.
    pub id: UniverseId,
    /// Human-readable name.
    pub name: String,
    /// Monotonic version counter, advanced only by the entity store.
    pub version: u64,
    /// Mutual-exclusion flag for mutating tasks.
    pub locked: bool,
    /// The mutable descriptor.
    pub details: UniverseDetails,
}

impl Universe {
    /// Create a fresh, unlocked universe at version 0.
    pub fn new(id: UniverseId, name: impl Into<String>, details: UniverseDetails) -> Self {
        Self {
            id,
            name: name.into(),
            version: 0,
            locked: false,
            details,
        }
    }

    /// Check whether a mutating task currently holds this universe.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_universe_is_unlocked_at_version_zero() {
        let u = Universe::new(UniverseId::new(), "u-1", UniverseDetails::default());
        assert_eq!(u.version, 0);
        assert!(!u.is_locked());
        assert!(!u.details.update_in_progress);
        assert!(!u.details.update_succeeded);
    }

    #[test]
    fn node_role_filters() {
        let details = UniverseDetails {
            nodes: vec![
                NodeDetails {
                    name: "n1".to_string(),
                    admin: NodeHandle::new("10.0.0.1", 9100),
                    provider: "aws".to_string(),
                    region: "us-west-2".to_string(),
                    instance_type: "c5.large".to_string(),
                    is_master: true,
                    is_tserver: true,
                },
                NodeDetails {
                    name: "n2".to_string(),
                    admin: NodeHandle::new("10.0.0.2", 9100),
                    provider: "aws".to_string(),
                    region: "us-west-2".to_string(),
                    instance_type: "c5.large".to_string(),
                    is_master: false,
                    is_tserver: true,
                },
            ],
            ..UniverseDetails::default()
        };
        assert_eq!(details.masters().count(), 1);
        assert_eq!(details.tservers().count(), 2);
        assert!(details.node("n2").is_some());
        assert!(details.node("n9").is_none());
    }
}
