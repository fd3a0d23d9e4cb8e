//! Execution context shared by tasks and subtasks.

use crate::config::CommissionerConfig;
use flotilla_core::rpc::AdminRpc;
use flotilla_core::store::{UniverseStore, XClusterStore};
use std::sync::Arc;

/// Context handed to every task and subtask execution.
///
/// All collaborators are explicit: the entity stores, the administrative
/// RPC adapter and the engine configuration. There are no process-wide
/// singletons; tests construct a context around scripted collaborators.
#[derive(Clone)]
pub struct TaskContext {
    /// The versioned universe store.
    pub universes: Arc<UniverseStore>,
    /// The replication-config store.
    pub xclusters: Arc<XClusterStore>,
    /// The administrative RPC adapter.
    pub rpc: Arc<dyn AdminRpc>,
    /// Engine configuration (RPC deadlines, retry bounds).
    pub config: CommissionerConfig,
}

impl TaskContext {
    /// Create a context over the given collaborators.
    pub fn new(
        universes: Arc<UniverseStore>,
        xclusters: Arc<XClusterStore>,
        rpc: Arc<dyn AdminRpc>,
        config: CommissionerConfig,
    ) -> Self {
        Self {
            universes,
            xclusters,
            rpc,
            config,
        }
    }
}
