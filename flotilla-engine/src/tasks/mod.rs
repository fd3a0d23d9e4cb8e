//! Tasks: user-level multi-step mutating operations.
//!
//! A task owns the lock on its target universe, an ordered sequence of
//! subtasks, the overall success/failure determination and the
//! failure-path bookkeeping. The driver in [`runner`] enforces the state
//! machine: Created → Running → {Success | Failure}, terminal states
//! never retried in place.

mod create_xcluster;
mod delete_xcluster;
mod params;
pub(crate) mod runner;
mod set_certificate;
mod set_flags;

pub use create_xcluster::CreateXClusterConfigTask;
pub use delete_xcluster::DeleteXClusterConfigTask;
pub use params::{
    ServerType, SetFlagsParams, TaskParams, UpdateCertificateParams, XClusterCreateParams,
    XClusterDeleteParams,
};
pub use set_certificate::UpdateCertificateTask;
pub use set_flags::SetRuntimeFlagsTask;

use crate::context::TaskContext;
use crate::subtasks::Subtask;
use flotilla_core::error::Result;
use flotilla_core::model::TaskType;
use flotilla_core::types::UniverseId;
use std::future::Future;
use std::pin::Pin;

/// A boxed future for async task steps.
pub type TaskFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// One user-level operation against a universe.
///
/// `plan` runs after the universe lock is held and produces the ordered
/// subtasks; a plan error is a task-level failure (it still runs the
/// failure hook and releases the lock). `on_failure` records the failed
/// attempt on any secondary entity the task manages.
pub trait Task: Send + Sync {
    /// The kind of operation.
    fn task_type(&self) -> TaskType;

    /// The universe this task locks and mutates.
    fn target(&self) -> UniverseId;

    /// Validate submission parameters before any side effect.
    ///
    /// # Errors
    /// Returns `InvalidParams`; the submission is rejected with no state
    /// changed.
    fn validate_params(&self) -> Result<()>;

    /// Serialized submission parameters for the task record.
    fn params_json(&self) -> serde_json::Value;

    /// Produce the ordered subtasks. Runs with the target lock held.
    fn plan<'a>(&'a self, ctx: &'a TaskContext) -> TaskFuture<'a, Vec<Box<dyn Subtask>>>;

    /// Failure-path bookkeeping, run before the lock is released with
    /// `succeeded = false`.
    fn on_failure<'a>(&'a self, _ctx: &'a TaskContext) -> TaskFuture<'a, ()> {
        Box::pin(async { Ok(()) })
    }
}

/// Build the concrete task for a submission.
///
/// Resolves the target universe where the parameters only name a
/// secondary entity (a delete names its config; the config names the
/// universe).
pub(crate) fn build_task(ctx: &TaskContext, params: &TaskParams) -> Result<Box<dyn Task>> {
    match params {
        TaskParams::CreateXClusterConfig(p) => {
            Ok(Box::new(CreateXClusterConfigTask::new(p.clone())))
        }
        TaskParams::DeleteXClusterConfig(p) => {
            let config = ctx.xclusters.get(p.config)?;
            Ok(Box::new(DeleteXClusterConfigTask::new(
                p.clone(),
                config.target_universe,
            )))
        }
        TaskParams::SetRuntimeFlags(p) => Ok(Box::new(SetRuntimeFlagsTask::new(p.clone()))),
        TaskParams::UpdateCertificate(p) => Ok(Box::new(UpdateCertificateTask::new(p.clone()))),
    }
}
