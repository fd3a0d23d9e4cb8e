//! Audit records for external observability.
//!
//! One `CustomerTask` entry is emitted per submitted task, linking the
//! task identity to the entity it targets and a human-readable action.
//! Entries are created at submission time and never mutated.

use crate::types::TaskId;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// The kind of entity a task targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    /// A universe.
    Universe,
    /// A cross-cluster replication config.
    XClusterConfig,
}

/// An append-only audit entry for one submitted task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerTask {
    /// Entry identity.
    pub id: Uuid,
    /// The task this entry records.
    pub task_id: TaskId,
    /// Kind of entity the task targets.
    pub target_type: TargetType,
    /// Identity of the targeted entity.
    pub target_id: Uuid,
    /// Human-readable action (e.g., "Delete replication config repl-1").
    pub action: String,
    /// Submission time.
    pub created_at: SystemTime,
}

impl CustomerTask {
    /// Create an audit entry at the current time.
    pub fn new(
        task_id: TaskId,
        target_type: TargetType,
        target_id: Uuid,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            target_type,
            target_id,
            action: action.into(),
            created_at: SystemTime::now(),
        }
    }
}
