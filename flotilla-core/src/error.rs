//! Error types for Flotilla.
//!
//! This module provides strongly-typed errors with actionable context.
//! All errors carry the relevant identifiers (universe ID, config ID,
//! task type, etc.) so a failed operation can always be traced back to
//! the entity it touched.

use crate::types::{TaskId, UniverseId, XClusterId};
use thiserror::Error;

/// The main error type for Flotilla operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlotillaError {
    // =========================================================================
    // Store Errors (E101-E199)
    // =========================================================================
    /// Universe does not exist in the entity store.
    #[error("E101: Universe {universe} not found")]
    UniverseNotFound {
        /// The universe that was looked up.
        universe: UniverseId,
    },

    /// Replication config does not exist in the entity store.
    #[error("E102: Replication config {config} not found")]
    XClusterNotFound {
        /// The config that was looked up.
        config: XClusterId,
    },

    /// An entity with the same identity already exists.
    #[error("E103: Entity {id} already exists")]
    EntityExists {
        /// Identity of the conflicting entity.
        id: String,
    },

    /// Optimistic-concurrency conflict: another writer committed between
    /// load and save. The whole update was discarded; nothing was applied.
    #[error(
        "E104: Concurrent modification of universe {universe}: \
         loaded version {loaded}, stored version {stored}"
    )]
    ConcurrentModification {
        /// The universe whose write was rejected.
        universe: UniverseId,
        /// Version observed at load time.
        loaded: u64,
        /// Version found at commit time.
        stored: u64,
    },

    /// Task does not exist in the commissioner's registry.
    #[error("E105: Task {task} not found")]
    TaskNotFound {
        /// The task that was looked up.
        task: TaskId,
    },

    // =========================================================================
    // Lock Errors (E201-E299)
    // =========================================================================
    /// Universe is locked by another in-flight task.
    #[error("E201: Universe {universe} is already locked by another task")]
    AlreadyLocked {
        /// The universe that could not be locked.
        universe: UniverseId,
    },

    /// A lock-protected write was attempted outside an edit window.
    #[error("E202: Universe {universe} is not being edited")]
    NotBeingEdited {
        /// The universe that is not under an active update.
        universe: UniverseId,
    },

    /// Lock release was requested for a universe that holds no lock.
    #[error("E203: Universe {universe} is not locked")]
    NotLocked {
        /// The universe that holds no lock.
        universe: UniverseId,
    },

    // =========================================================================
    // Parameter / State-Machine Errors (E301-E399)
    // =========================================================================
    /// Task or subtask parameters failed validation. Rejected before any
    /// side effect; no state was changed.
    #[error("E301: Invalid parameters for {operation}: {cause}")]
    InvalidParams {
        /// The task or subtask whose parameters were rejected.
        operation: String,
        /// Why the parameters were rejected.
        cause: String,
    },

    /// Replication-config status transition is not part of the lifecycle.
    #[error("E302: Illegal transition for replication config {config}: {from} -> {to}")]
    IllegalStateTransition {
        /// The config whose transition was rejected.
        config: XClusterId,
        /// Status at the time of the attempt.
        from: String,
        /// Requested status.
        to: String,
    },

    /// Deletion was requested for a replication config in a state that
    /// does not permit it. The attempt is recorded as a failed operation.
    #[error("E303: Cannot delete replication config {config} in `{state}` state")]
    IllegalDelete {
        /// The config whose deletion was rejected.
        config: XClusterId,
        /// The state that forbids deletion.
        state: String,
    },

    // =========================================================================
    // RPC Errors (E401-E499)
    // =========================================================================
    /// The administrative endpoint was reached and rejected the command.
    #[error("E401: Remote rejected (code {code}): {message}")]
    RemoteRejected {
        /// Server-side error code.
        code: u32,
        /// Server-side error message, propagated verbatim.
        message: String,
    },

    /// The administrative endpoint could not be reached (including
    /// timeouts). Distinct from a well-formed server rejection.
    #[error("E402: Transport failure: {cause}")]
    TransportFailure {
        /// Why the endpoint could not be asked.
        cause: String,
    },

    // =========================================================================
    // Engine Errors (E501-E599)
    // =========================================================================
    /// A subtask failed; carries the subtask name and the underlying error.
    #[error("E501: Subtask {subtask} failed: {cause}")]
    SubtaskFailed {
        /// The subtask that failed.
        subtask: String,
        /// The underlying failure, rendered.
        cause: String,
    },
}

impl FlotillaError {
    /// Get the stable error code (e.g., "E201").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UniverseNotFound { .. } => "E101",
            Self::XClusterNotFound { .. } => "E102",
            Self::EntityExists { .. } => "E103",
            Self::ConcurrentModification { .. } => "E104",
            Self::TaskNotFound { .. } => "E105",
            Self::AlreadyLocked { .. } => "E201",
            Self::NotBeingEdited { .. } => "E202",
            Self::NotLocked { .. } => "E203",
            Self::InvalidParams { .. } => "E301",
            Self::IllegalStateTransition { .. } => "E302",
            Self::IllegalDelete { .. } => "E303",
            Self::RemoteRejected { .. } => "E401",
            Self::TransportFailure { .. } => "E402",
            Self::SubtaskFailed { .. } => "E501",
        }
    }

    /// Check if the caller may retry the whole operation later.
    ///
    /// `AlreadyLocked` clears when the holding task terminates,
    /// `ConcurrentModification` clears on re-read, and transport failures
    /// are transient by definition. Everything else requires intervention.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::AlreadyLocked { .. }
                | Self::ConcurrentModification { .. }
                | Self::TransportFailure { .. }
        )
    }

    /// Check if this error was rejected before any side effect.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidParams { .. })
    }
}

/// Result type alias using `FlotillaError`.
pub type Result<T> = std::result::Result<T, FlotillaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let err = FlotillaError::AlreadyLocked {
            universe: UniverseId::new(),
        };
        assert_eq!(err.code(), "E201");

        let err = FlotillaError::TransportFailure {
            cause: "connection refused".to_string(),
        };
        assert_eq!(err.code(), "E402");
    }

    #[test]
    fn retriable_classification() {
        assert!(FlotillaError::AlreadyLocked {
            universe: UniverseId::new()
        }
        .is_retriable());
        assert!(FlotillaError::TransportFailure {
            cause: "timeout".to_string()
        }
        .is_retriable());
        assert!(!FlotillaError::RemoteRejected {
            code: 7,
            message: "no".to_string()
        }
        .is_retriable());
        assert!(!FlotillaError::InvalidParams {
            operation: "SetRuntimeFlags".to_string(),
            cause: "empty flag map".to_string()
        }
        .is_retriable());
    }

    #[test]
    fn illegal_delete_names_config_and_state() {
        let config = XClusterId::new();
        let err = FlotillaError::IllegalDelete {
            config,
            state: "Init".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains(&config.to_string()));
        assert!(rendered.contains("Init"));
    }
}
