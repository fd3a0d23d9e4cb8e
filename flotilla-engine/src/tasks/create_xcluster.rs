//! Set up a cross-cluster replication config.

use super::params::XClusterCreateParams;
use super::{Task, TaskFuture};
use crate::context::TaskContext;
use crate::subtasks::{SetupReplication, Subtask};
use flotilla_core::error::{FlotillaError, Result};
use flotilla_core::model::{TaskType, XClusterConfig, XClusterStatus};
use flotilla_core::types::UniverseId;
use parking_lot::Mutex;

/// Create a replication config and confirm it on the target cluster.
///
/// A fresh submission inserts the config in `Init`; resubmitting after a
/// failure finds the existing `Failed` config and repairs it. Either way
/// a successful setup leaves the config `Running`.
pub struct CreateXClusterConfigTask {
    params: XClusterCreateParams,
    // Config planned by this run, for the failure hook.
    planned: Mutex<Option<flotilla_core::types::XClusterId>>,
}

impl CreateXClusterConfigTask {
    /// Create the task.
    pub fn new(params: XClusterCreateParams) -> Self {
        Self {
            params,
            planned: Mutex::new(None),
        }
    }
}

impl Task for CreateXClusterConfigTask {
    fn task_type(&self) -> TaskType {
        TaskType::CreateXClusterConfig
    }

    fn target(&self) -> UniverseId {
        self.params.target_universe
    }

    fn validate_params(&self) -> Result<()> {
        if self.params.name.is_empty() {
            return Err(FlotillaError::InvalidParams {
                operation: self.task_type().to_string(),
                cause: "config name cannot be empty".to_string(),
            });
        }
        if self.params.tables.is_empty() {
            return Err(FlotillaError::InvalidParams {
                operation: self.task_type().to_string(),
                cause: "table set cannot be empty".to_string(),
            });
        }
        if self.params.source_universe == self.params.target_universe {
            return Err(FlotillaError::InvalidParams {
                operation: self.task_type().to_string(),
                cause: "source and target universe must differ".to_string(),
            });
        }
        Ok(())
    }

    fn params_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.params).unwrap_or(serde_json::Value::Null)
    }

    fn plan<'a>(&'a self, ctx: &'a TaskContext) -> TaskFuture<'a, Vec<Box<dyn Subtask>>> {
        Box::pin(async move {
            let existing = ctx
                .xclusters
                .find_by_name(self.params.source_universe, &self.params.name);

            let config_id = match existing {
                // Repair re-run of a failed setup.
                Some(config) if config.status == XClusterStatus::Failed => config.id,
                Some(config) => {
                    return Err(FlotillaError::EntityExists {
                        id: config.id.to_string(),
                    })
                }
                None => {
                    let config = XClusterConfig::new(
                        self.params.name.clone(),
                        self.params.source_universe,
                        self.params.target_universe,
                        self.params.tables.clone(),
                        XClusterStatus::Init,
                    );
                    let id = config.id;
                    ctx.xclusters.insert(config)?;
                    id
                }
            };

            *self.planned.lock() = Some(config_id);
            Ok(vec![Box::new(SetupReplication { config: config_id }) as Box<dyn Subtask>])
        })
    }

    fn on_failure<'a>(&'a self, ctx: &'a TaskContext) -> TaskFuture<'a, ()> {
        Box::pin(async move {
            if let Some(config_id) = *self.planned.lock() {
                if let Some(config) = ctx.xclusters.maybe_get(config_id) {
                    if config.status.can_transition(XClusterStatus::Failed) {
                        ctx.xclusters
                            .update_status(config_id, XClusterStatus::Failed)?;
                    }
                }
            }
            Ok(())
        })
    }
}
