//! Rotate a universe's node-to-node certificate reference.

use super::params::UpdateCertificateParams;
use super::{Task, TaskFuture};
use crate::context::TaskContext;
use crate::subtasks::{SetCertificate, Subtask};
use flotilla_core::error::Result;
use flotilla_core::model::TaskType;
use flotilla_core::types::UniverseId;

/// One lock-protected write swapping the certificate reference.
pub struct UpdateCertificateTask {
    params: UpdateCertificateParams,
}

impl UpdateCertificateTask {
    /// Create the task.
    pub fn new(params: UpdateCertificateParams) -> Self {
        Self { params }
    }
}

impl Task for UpdateCertificateTask {
    fn task_type(&self) -> TaskType {
        TaskType::UpdateCertificate
    }

    fn target(&self) -> UniverseId {
        self.params.universe
    }

    fn validate_params(&self) -> Result<()> {
        Ok(())
    }

    fn params_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.params).unwrap_or(serde_json::Value::Null)
    }

    fn plan<'a>(&'a self, _ctx: &'a TaskContext) -> TaskFuture<'a, Vec<Box<dyn Subtask>>> {
        Box::pin(async move {
            Ok(vec![Box::new(SetCertificate {
                universe: self.params.universe,
                cert: self.params.cert,
            }) as Box<dyn Subtask>])
        })
    }
}
