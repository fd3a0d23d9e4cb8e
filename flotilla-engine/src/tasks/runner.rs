//! The task driver.
//!
//! Runs one task end to end: acquire the target universe lock, plan,
//! execute the subtasks strictly in order, and finalize. The lock is
//! released on every path that acquired it, with `succeeded` reflecting
//! the outcome; a task that never got the lock performs zero mutations.

use crate::commissioner::TaskHandle;
use crate::context::TaskContext;
use crate::tasks::Task;
use flotilla_core::error::{FlotillaError, Result};
use std::sync::Arc;

pub(crate) async fn run(task: Box<dyn Task>, ctx: Arc<TaskContext>, handle: Arc<TaskHandle>) {
    let ctx = ctx.as_ref();
    let target = task.target();
    handle.mark_running();

    // Fail fast against a locked universe: no queueing, no mutations.
    if let Err(err) = ctx.universes.acquire_lock(target) {
        tracing::warn!(task = %handle.id(), universe = %target, %err, "task could not start");
        handle.mark_failed(&err);
        return;
    }

    match drive(task.as_ref(), ctx, &handle).await {
        Ok(()) => match ctx.universes.release_lock(target, true) {
            Ok(_) => {
                tracing::info!(task = %handle.id(), universe = %target, "task succeeded");
                handle.mark_succeeded();
            }
            Err(err) => {
                tracing::error!(task = %handle.id(), %err, "failed to release lock after success");
                handle.mark_failed(&err);
            }
        },
        Err(err) => {
            if let Err(hook_err) = task.on_failure(ctx).await {
                tracing::error!(task = %handle.id(), %hook_err, "failure hook did not complete");
            }
            if let Err(unlock_err) = ctx.universes.release_lock(target, false) {
                tracing::error!(task = %handle.id(), %unlock_err, "failed to release lock after failure");
            }
            tracing::warn!(task = %handle.id(), universe = %target, %err, "task failed");
            handle.mark_failed(&err);
        }
    }
}

/// Plan and execute the subtasks. Runs with the target lock held.
async fn drive(task: &dyn Task, ctx: &TaskContext, handle: &TaskHandle) -> Result<()> {
    let subtasks = task.plan(ctx).await?;
    handle.set_subtasks(subtasks.iter().map(|s| s.name()).collect());

    for (index, subtask) in subtasks.iter().enumerate() {
        handle.subtask_running(index);
        let result = match subtask.validate_params() {
            Ok(()) => subtask.execute(ctx).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => handle.subtask_succeeded(index),
            Err(err) => {
                // First failure stops the task; later subtasks stay
                // untouched.
                handle.subtask_failed(index, &err);
                return Err(FlotillaError::SubtaskFailed {
                    subtask: subtask.name(),
                    cause: err.to_string(),
                });
            }
        }
    }
    Ok(())
}
