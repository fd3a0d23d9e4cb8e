//! In-memory entity stores with optimistic concurrency.
//!
//! This module provides the only sanctioned mutation paths for the
//! control-plane entities:
//! - [`UniverseStore`]: version-checked read-modify-write over universes,
//!   plus the lock acquire/release primitives
//! - [`XClusterStore`]: keyed store for replication configs with
//!   transition-checked status updates
//!
//! The universe store is the second line of defense against lost updates:
//! even if the lock discipline were bypassed, a conflicting commit fails
//! with `ConcurrentModification` instead of silently overwriting.

mod universe;
mod xcluster;

pub use universe::UniverseStore;
pub use xcluster::XClusterStore;
