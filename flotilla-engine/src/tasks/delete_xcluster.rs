//! Delete a cross-cluster replication config.

use super::params::XClusterDeleteParams;
use super::{Task, TaskFuture};
use crate::context::TaskContext;
use crate::subtasks::{Subtask, TeardownReplication};
use flotilla_core::error::{FlotillaError, Result};
use flotilla_core::model::{TaskType, XClusterStatus};
use flotilla_core::types::UniverseId;

/// Tear down replication on the target cluster and remove the config.
///
/// Deletion is only valid once setup has been confirmed: a config still
/// in `Init` is rejected at plan time, and the rejected attempt is
/// recorded by moving the config to `Failed` without removing it.
pub struct DeleteXClusterConfigTask {
    params: XClusterDeleteParams,
    target: UniverseId,
}

impl DeleteXClusterConfigTask {
    /// Create the task for a config that resolves to the given target
    /// universe.
    pub fn new(params: XClusterDeleteParams, target: UniverseId) -> Self {
        Self { params, target }
    }
}

impl Task for DeleteXClusterConfigTask {
    fn task_type(&self) -> TaskType {
        TaskType::DeleteXClusterConfig
    }

    fn target(&self) -> UniverseId {
        self.target
    }

    fn validate_params(&self) -> Result<()> {
        Ok(())
    }

    fn params_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.params).unwrap_or(serde_json::Value::Null)
    }

    fn plan<'a>(&'a self, ctx: &'a TaskContext) -> TaskFuture<'a, Vec<Box<dyn Subtask>>> {
        Box::pin(async move {
            let config = ctx.xclusters.get(self.params.config)?;
            if config.status == XClusterStatus::Init {
                return Err(FlotillaError::IllegalDelete {
                    config: config.id,
                    state: config.status.to_string(),
                });
            }
            Ok(vec![Box::new(TeardownReplication {
                config: config.id,
            }) as Box<dyn Subtask>])
        })
    }

    fn on_failure<'a>(&'a self, ctx: &'a TaskContext) -> TaskFuture<'a, ()> {
        Box::pin(async move {
            // Record the failed attempt on the config, if it still exists.
            if let Some(config) = ctx.xclusters.maybe_get(self.params.config) {
                if config.status.can_transition(XClusterStatus::Failed) {
                    ctx.xclusters
                        .update_status(config.id, XClusterStatus::Failed)?;
                }
            }
            Ok(())
        })
    }
}
