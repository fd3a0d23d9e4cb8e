//! The commissioner: task submission, scheduling and status.
//!
//! The commissioner accepts task submissions, validates them before any
//! side effect, runs each task as an independent unit of work on a
//! bounded worker pool and tracks task state for polling and waiting.
//! Mutual exclusion between tasks for the same universe comes from the
//! entity lock, not from queue ordering: a second task against a locked
//! universe fails fast instead of queueing.

mod audit;
mod handle;

pub use audit::AuditLog;
pub use handle::TaskHandle;

use crate::config::CommissionerConfig;
use crate::context::TaskContext;
use crate::tasks::{build_task, runner, TaskParams};
use flotilla_core::error::{FlotillaError, Result};
use flotilla_core::model::{CustomerTask, TargetType, TaskInfo, Universe};
use flotilla_core::rpc::AdminRpc;
use flotilla_core::store::{UniverseStore, XClusterStore};
use flotilla_core::types::{TaskId, UniverseId};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::instrument;

/// Orchestrator for long-running mutating tasks.
pub struct Commissioner {
    ctx: Arc<TaskContext>,
    tasks: DashMap<TaskId, Arc<TaskHandle>>,
    audit: AuditLog,
    permits: Arc<Semaphore>,
}

impl Commissioner {
    /// Create a commissioner over the given collaborators.
    pub fn new(
        universes: Arc<UniverseStore>,
        xclusters: Arc<XClusterStore>,
        rpc: Arc<dyn AdminRpc>,
        config: CommissionerConfig,
    ) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent_tasks));
        let ctx = Arc::new(TaskContext::new(universes, xclusters, rpc, config));
        Self {
            ctx,
            tasks: DashMap::new(),
            audit: AuditLog::new(),
            permits,
        }
    }

    /// The universe store this commissioner mutates.
    pub fn universes(&self) -> Arc<UniverseStore> {
        Arc::clone(&self.ctx.universes)
    }

    /// The replication-config store this commissioner mutates.
    pub fn xclusters(&self) -> Arc<XClusterStore> {
        Arc::clone(&self.ctx.xclusters)
    }

    /// Submit a task for asynchronous execution.
    ///
    /// Parameters are validated synchronously; a rejected submission has
    /// changed no state. On acceptance one audit entry is emitted and the
    /// task id is returned immediately — completion is observed through
    /// [`status`](Self::status) or [`wait`](Self::wait).
    ///
    /// # Errors
    /// - `InvalidParams` when validation rejects the parameters
    /// - `XClusterNotFound` when a delete names an unknown config
    #[instrument(skip(self, params), fields(task_type = %params.task_type()))]
    pub fn submit(&self, params: TaskParams) -> Result<TaskId> {
        let task = build_task(&self.ctx, &params)?;
        task.validate_params()?;

        let id = TaskId::new();
        let info = TaskInfo::new(id, task.task_type(), task.target(), task.params_json());
        let handle = TaskHandle::new(info);
        self.tasks.insert(id, Arc::clone(&handle));
        self.audit.record(audit_entry(id, &params, task.target()));
        tracing::info!(task = %id, universe = %task.target(), "task submitted");

        let ctx = Arc::clone(&self.ctx);
        let permits = Arc::clone(&self.permits);
        tokio::spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                tracing::error!(task = %handle.id(), "worker pool shut down before task start");
                return;
            };
            runner::run(task, ctx, handle).await;
        });

        Ok(id)
    }

    /// Snapshot of a task's record: overall state, per-subtask states and
    /// error details.
    ///
    /// # Errors
    /// Returns `TaskNotFound` for an unknown id.
    pub fn status(&self, id: TaskId) -> Result<TaskInfo> {
        self.tasks
            .get(&id)
            .map(|handle| handle.snapshot())
            .ok_or(FlotillaError::TaskNotFound { task: id })
    }

    /// Wait for a task to reach a terminal state and return its record.
    ///
    /// # Errors
    /// Returns `TaskNotFound` for an unknown id.
    pub async fn wait(&self, id: TaskId) -> Result<TaskInfo> {
        let handle = self
            .tasks
            .get(&id)
            .map(|h| Arc::clone(&h))
            .ok_or(FlotillaError::TaskNotFound { task: id })?;

        let mut rx = handle.subscribe();
        while !rx.borrow_and_update().is_terminal() {
            if rx.changed().await.is_err() {
                break;
            }
        }
        Ok(handle.snapshot())
    }

    /// Operator action: release a stale lock left behind by a crashed
    /// task.
    ///
    /// Never invoked by the engine itself; locks do not expire on their
    /// own.
    ///
    /// # Errors
    /// Returns `NotLocked` when the universe holds no lock.
    pub fn force_unlock(&self, universe: UniverseId) -> Result<Universe> {
        tracing::warn!(%universe, "operator force-unlock");
        self.ctx.universes.release_lock(universe, false)
    }

    /// Snapshot of the audit log, in submission order.
    pub fn audit_log(&self) -> Vec<CustomerTask> {
        self.audit.entries()
    }
}

fn audit_entry(id: TaskId, params: &TaskParams, target: UniverseId) -> CustomerTask {
    let (target_type, action) = match params {
        TaskParams::CreateXClusterConfig(p) => (
            TargetType::XClusterConfig,
            format!("Create replication config {}", p.name),
        ),
        TaskParams::DeleteXClusterConfig(p) => (
            TargetType::XClusterConfig,
            format!("Delete replication config {}", p.config),
        ),
        TaskParams::SetRuntimeFlags(p) => (
            TargetType::Universe,
            format!("Set runtime flags on {}", p.universe),
        ),
        TaskParams::UpdateCertificate(p) => (
            TargetType::Universe,
            format!("Rotate certificate on {}", p.universe),
        ),
    };
    CustomerTask::new(id, target_type, target.as_uuid(), action)
}
