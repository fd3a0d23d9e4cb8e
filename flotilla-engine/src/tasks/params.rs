//! Typed submission parameters.

use flotilla_core::model::TaskType;
use flotilla_core::types::{UniverseId, XClusterId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Which member processes a flag operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerType {
    /// Coordination processes.
    Master,
    /// Storage server processes.
    Tserver,
}

/// Parameters for setting up a replication config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XClusterCreateParams {
    /// Config name, unique per source universe.
    pub name: String,
    /// Universe the replicated tables originate from.
    pub source_universe: UniverseId,
    /// Universe the tables are replicated to.
    pub target_universe: UniverseId,
    /// Identifiers of the tables to replicate.
    pub tables: BTreeSet<String>,
}

/// Parameters for deleting a replication config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XClusterDeleteParams {
    /// The config to delete.
    pub config: XClusterId,
}

/// Parameters for setting in-memory runtime flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetFlagsParams {
    /// The universe whose nodes are updated.
    pub universe: UniverseId,
    /// Which member processes to update.
    pub server_type: ServerType,
    /// Flag name/value pairs, applied in key order per node.
    pub flags: BTreeMap<String, String>,
    /// Apply flags not marked runtime-safe.
    pub force: bool,
}

/// Parameters for rotating the node-to-node certificate reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCertificateParams {
    /// The universe whose certificate reference is rotated.
    pub universe: UniverseId,
    /// The new certificate.
    pub cert: Uuid,
}

/// Submission parameters, tagged by operation kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TaskParams {
    /// Set up a replication config.
    CreateXClusterConfig(XClusterCreateParams),
    /// Tear down and remove a replication config.
    DeleteXClusterConfig(XClusterDeleteParams),
    /// Set in-memory runtime flags.
    SetRuntimeFlags(SetFlagsParams),
    /// Rotate the certificate reference.
    UpdateCertificate(UpdateCertificateParams),
}

impl TaskParams {
    /// The operation kind these parameters describe.
    #[must_use]
    pub fn task_type(&self) -> TaskType {
        match self {
            Self::CreateXClusterConfig(_) => TaskType::CreateXClusterConfig,
            Self::DeleteXClusterConfig(_) => TaskType::DeleteXClusterConfig,
            Self::SetRuntimeFlags(_) => TaskType::SetRuntimeFlags,
            Self::UpdateCertificate(_) => TaskType::UpdateCertificate,
        }
    }
}
