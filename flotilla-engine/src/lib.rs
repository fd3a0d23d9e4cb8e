//! Flotilla Engine - Task execution runtime.
//!
//! This crate provides the execution infrastructure for the Flotilla
//! control plane:
//! - The commissioner: submission, bounded worker pool, status and wait
//! - The task driver: lock acquire/release, strict-order subtask
//!   execution, failure-path bookkeeping
//! - Concrete tasks: replication-config setup and teardown, runtime
//!   flags, certificate rotation
//! - Cost summarization over the price-lookup capability
//!
//! Tasks targeting different universes run concurrently; tasks targeting
//! the same universe are serialized by the entity lock — a second task
//! for a locked universe fails fast rather than queueing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commissioner;
pub mod config;
pub mod context;
pub mod cost;
pub mod subtasks;
pub mod tasks;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::commissioner::{AuditLog, Commissioner, TaskHandle};
    pub use crate::config::CommissionerConfig;
    pub use crate::context::TaskContext;
    pub use crate::cost::universe_hourly_cost;
    pub use crate::subtasks::{
        SetCertificate, SetFlagInMemory, SetupReplication, Subtask, SubtaskFuture,
        TeardownReplication,
    };
    pub use crate::tasks::{
        CreateXClusterConfigTask, DeleteXClusterConfigTask, ServerType, SetFlagsParams,
        SetRuntimeFlagsTask, Task, TaskFuture, TaskParams, UpdateCertificateParams,
        UpdateCertificateTask, XClusterCreateParams, XClusterDeleteParams,
    };
}

pub use commissioner::Commissioner;
pub use config::CommissionerConfig;
pub use context::TaskContext;
pub use tasks::TaskParams;
