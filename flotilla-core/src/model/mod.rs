//! Data model for the Flotilla control plane.
//!
//! This module defines the persistent entities the orchestrator mutates:
//! - `Universe`: the versioned, lockable cluster descriptor
//! - `XClusterConfig`: a cross-cluster replication config with its own
//!   status lifecycle
//! - `TaskInfo`: the record of one submitted task and its subtasks
//! - `CustomerTask`: the append-only audit entry emitted per submission
//!
//! Entities here are plain values; all mutation goes through the stores
//! in [`crate::store`].

mod audit;
mod task;
mod universe;
mod xcluster;

pub use audit::{CustomerTask, TargetType};
pub use task::{ErrorDetail, SubtaskInfo, SubtaskState, TaskInfo, TaskState, TaskType};
pub use universe::{Cluster, ClusterType, NodeDetails, NodeHandle, Universe, UniverseDetails, UserIntent};
pub use xcluster::{XClusterConfig, XClusterStatus};
