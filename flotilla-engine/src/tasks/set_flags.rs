//! Set in-memory runtime flags across a universe's nodes.

use super::params::{ServerType, SetFlagsParams};
use super::{Task, TaskFuture};
use crate::context::TaskContext;
use crate::subtasks::{SetFlagInMemory, Subtask};
use flotilla_core::error::{FlotillaError, Result};
use flotilla_core::model::TaskType;
use flotilla_core::types::UniverseId;

/// Apply a flag batch to every node of the requested role, one node at a
/// time.
///
/// Subtasks run in node order; a rejected flag on one node stops the task
/// before any later node is touched.
pub struct SetRuntimeFlagsTask {
    params: SetFlagsParams,
}

impl SetRuntimeFlagsTask {
    /// Create the task.
    pub fn new(params: SetFlagsParams) -> Self {
        Self { params }
    }
}

impl Task for SetRuntimeFlagsTask {
    fn task_type(&self) -> TaskType {
        TaskType::SetRuntimeFlags
    }

    fn target(&self) -> UniverseId {
        self.params.universe
    }

    fn validate_params(&self) -> Result<()> {
        if self.params.flags.is_empty() {
            return Err(FlotillaError::InvalidParams {
                operation: self.task_type().to_string(),
                cause: "flag map cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    fn params_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.params).unwrap_or(serde_json::Value::Null)
    }

    fn plan<'a>(&'a self, ctx: &'a TaskContext) -> TaskFuture<'a, Vec<Box<dyn Subtask>>> {
        Box::pin(async move {
            let universe = ctx.universes.get(self.params.universe)?;
            let nodes: Vec<_> = match self.params.server_type {
                ServerType::Master => universe.details.masters().cloned().collect(),
                ServerType::Tserver => universe.details.tservers().cloned().collect(),
            };
            if nodes.is_empty() {
                return Err(FlotillaError::InvalidParams {
                    operation: self.task_type().to_string(),
                    cause: format!(
                        "universe {} has no {:?} nodes",
                        self.params.universe, self.params.server_type
                    ),
                });
            }

            Ok(nodes
                .into_iter()
                .map(|node| {
                    Box::new(SetFlagInMemory {
                        node,
                        flags: self.params.flags.clone(),
                        force: self.params.force,
                    }) as Box<dyn Subtask>
                })
                .collect())
        })
    }
}
