//! Subtasks: the atomic units of work within a task.
//!
//! Each subtask exposes parameter validation (fails fast, before side
//! effects) and an effect (a store mutation, an RPC call, or both). A
//! subtask's effect is all-or-nothing: either it completes, or it reports
//! a structured failure with nothing half-applied.

mod retry;
mod set_certificate;
mod set_flag;
mod setup_replication;
mod teardown_replication;

pub use retry::{with_deadline, with_transport_retries};
pub use set_certificate::SetCertificate;
pub use set_flag::SetFlagInMemory;
pub use setup_replication::SetupReplication;
pub use teardown_replication::TeardownReplication;

use crate::context::TaskContext;
use flotilla_core::error::Result;
use std::future::Future;
use std::pin::Pin;

/// A boxed future for async subtask execution.
pub type SubtaskFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// One atomic step of a task.
///
/// Subtasks run strictly in order within their owning task; the first
/// failure stops the task. They always run between a matching lock
/// acquire/release pair on the target universe and never touch the lock
/// fields themselves.
pub trait Subtask: Send + Sync {
    /// Name of the subtask as recorded on the task (e.g.,
    /// "SetFlagInMemory(n1)").
    fn name(&self) -> String;

    /// Validate parameters before any side effect.
    ///
    /// # Errors
    /// Returns `InvalidParams` when the parameters cannot be executed.
    fn validate_params(&self) -> Result<()>;

    /// Perform the subtask's effect.
    fn execute<'a>(&'a self, ctx: &'a TaskContext) -> SubtaskFuture<'a>;
}
