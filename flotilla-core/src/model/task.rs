//! Task and subtask records.
//!
//! `TaskInfo` is the record the commissioner mutates as a task runs and
//! that the status API exposes. Once a task reaches `Success` or
//! `Failure` the record is terminal and never mutated again.

use crate::error::FlotillaError;
use crate::types::{TaskId, UniverseId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of user-level operation a task performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    /// Set up a cross-cluster replication config.
    CreateXClusterConfig,
    /// Tear down and remove a cross-cluster replication config.
    DeleteXClusterConfig,
    /// Set in-memory runtime flags on cluster member processes.
    SetRuntimeFlags,
    /// Rotate the universe's node-to-node certificate reference.
    UpdateCertificate,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateXClusterConfig => "CreateXClusterConfig",
            Self::DeleteXClusterConfig => "DeleteXClusterConfig",
            Self::SetRuntimeFlags => "SetRuntimeFlags",
            Self::UpdateCertificate => "UpdateCertificate",
        };
        f.write_str(name)
    }
}

/// Overall state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    /// Submitted, not yet picked up by the worker pool.
    Created,
    /// Executing subtasks.
    Running,
    /// All subtasks completed; terminal.
    Success,
    /// A subtask or the task itself failed; terminal.
    Failure,
}

impl TaskState {
    /// Check whether the state is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

/// State of one subtask within a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubtaskState {
    /// Planned, not yet started.
    Created,
    /// Executing.
    Running,
    /// Completed.
    Success,
    /// Failed; the owning task stops here.
    Failure,
}

/// Structured error payload recorded on a failed task or subtask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code (e.g., "E401").
    pub code: String,
    /// Rendered error message, original cause preserved verbatim.
    pub message: String,
}

impl From<&FlotillaError> for ErrorDetail {
    fn from(err: &FlotillaError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Record of one subtask.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtaskInfo {
    /// Subtask name (e.g., "TeardownReplication").
    pub name: String,
    /// Current state.
    pub state: SubtaskState,
    /// Failure detail, set only when `state == Failure`.
    pub error: Option<ErrorDetail>,
}

impl SubtaskInfo {
    /// Create a planned subtask record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: SubtaskState::Created,
            error: None,
        }
    }
}

/// Record of one submitted task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInfo {
    /// Task identity.
    pub id: TaskId,
    /// Kind of operation.
    pub task_type: TaskType,
    /// Universe the task mutates.
    pub target: UniverseId,
    /// Serialized submission parameters.
    pub params: serde_json::Value,
    /// Overall state.
    pub state: TaskState,
    /// Ordered subtask records, populated when the task is planned.
    pub subtasks: Vec<SubtaskInfo>,
    /// Task-level failure detail, set only when `state == Failure`.
    pub error: Option<ErrorDetail>,
}

impl TaskInfo {
    /// Create a freshly submitted task record.
    pub fn new(
        id: TaskId,
        task_type: TaskType,
        target: UniverseId,
        params: serde_json::Value,
    ) -> Self {
        Self {
            id,
            task_type,
            target,
            params,
            state: TaskState::Created,
            subtasks: Vec::new(),
            error: None,
        }
    }

    /// The first failed subtask, if any.
    pub fn failed_subtask(&self) -> Option<&SubtaskInfo> {
        self.subtasks
            .iter()
            .find(|s| s.state == SubtaskState::Failure)
    }
}
