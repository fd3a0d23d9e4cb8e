//! Prelude for convenient imports.
//!
//! # Example
//!
//! ```ignore
//! use flotilla_core::prelude::*;
//! ```

// Identifiers
pub use crate::types::{TaskId, UniverseId, XClusterId};

// Error handling
pub use crate::error::{FlotillaError, Result};

// Data model
pub use crate::model::{
    Cluster, ClusterType, CustomerTask, ErrorDetail, NodeDetails, NodeHandle, SubtaskInfo,
    SubtaskState, TargetType, TaskInfo, TaskState, TaskType, Universe, UniverseDetails,
    UserIntent, XClusterConfig, XClusterStatus,
};

// Stores
pub use crate::store::{UniverseStore, XClusterStore};

// Collaborator capabilities
pub use crate::pricing::{PriceLookup, StaticPriceTable};
pub use crate::rpc::{AdminRpc, RpcError, RpcFuture};
