//! Live task record with completion signaling.

use flotilla_core::error::FlotillaError;
use flotilla_core::model::{ErrorDetail, SubtaskInfo, SubtaskState, TaskInfo, TaskState};
use flotilla_core::types::TaskId;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

/// The commissioner's live record of one task.
///
/// Holds the mutable `TaskInfo` and a watch channel that observers use to
/// wait for the terminal state. Once terminal, the record is never
/// mutated again.
pub struct TaskHandle {
    info: RwLock<TaskInfo>,
    state_tx: watch::Sender<TaskState>,
}

impl TaskHandle {
    pub(crate) fn new(info: TaskInfo) -> Arc<Self> {
        let (state_tx, _) = watch::channel(info.state);
        Arc::new(Self {
            info: RwLock::new(info),
            state_tx,
        })
    }

    /// Task identity.
    pub fn id(&self) -> TaskId {
        self.info.read().id
    }

    /// Snapshot of the current record.
    pub fn snapshot(&self) -> TaskInfo {
        self.info.read().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.state_tx.subscribe()
    }

    fn set_state(&self, state: TaskState) {
        self.info.write().state = state;
        // Receivers may have gone away; state is still recorded above.
        let _ = self.state_tx.send(state);
    }

    pub(crate) fn mark_running(&self) {
        self.set_state(TaskState::Running);
    }

    pub(crate) fn mark_succeeded(&self) {
        self.set_state(TaskState::Success);
    }

    pub(crate) fn mark_failed(&self, err: &FlotillaError) {
        self.info.write().error = Some(ErrorDetail::from(err));
        self.set_state(TaskState::Failure);
    }

    pub(crate) fn set_subtasks(&self, names: Vec<String>) {
        self.info.write().subtasks = names.into_iter().map(SubtaskInfo::new).collect();
    }

    pub(crate) fn subtask_running(&self, index: usize) {
        if let Some(subtask) = self.info.write().subtasks.get_mut(index) {
            subtask.state = SubtaskState::Running;
        }
    }

    pub(crate) fn subtask_succeeded(&self, index: usize) {
        if let Some(subtask) = self.info.write().subtasks.get_mut(index) {
            subtask.state = SubtaskState::Success;
        }
    }

    pub(crate) fn subtask_failed(&self, index: usize, err: &FlotillaError) {
        if let Some(subtask) = self.info.write().subtasks.get_mut(index) {
            subtask.state = SubtaskState::Failure;
            subtask.error = Some(ErrorDetail::from(err));
        }
    }
}
