//! Append-only audit log.

use flotilla_core::model::CustomerTask;
use parking_lot::Mutex;

/// In-memory append-only log of `CustomerTask` entries, one per
/// submitted task.
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Mutex<Vec<CustomerTask>>,
}

impl AuditLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: CustomerTask) {
        self.entries.lock().push(entry);
    }

    /// Snapshot of all entries, in submission order.
    pub fn entries(&self) -> Vec<CustomerTask> {
        self.entries.lock().clone()
    }
}
