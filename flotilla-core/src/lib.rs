//! Flotilla Core Library
//!
//! This crate provides the foundational types, data model and adapter
//! contracts for the Flotilla control plane.
//!
//! # Overview
//!
//! Flotilla orchestrates long-running, multi-step mutating operations
//! against managed database clusters ("universes"). The core guarantees
//! are concurrency-shaped: only one mutating task touches a universe at a
//! time, and partial failures leave entity state consistent and
//! recoverable.
//!
//! # Key Components
//!
//! - **Model**: `Universe`, `XClusterConfig`, `TaskInfo` and friends
//! - **Store**: versioned entity store with an optimistic
//!   read-modify-write primitive and the universe lock discipline
//! - **Rpc**: the administrative RPC adapter contract
//! - **Testing**: scripted collaborators for deterministic tests
//!
//! # Example
//!
//! ```ignore
//! use flotilla_core::prelude::*;
//!
//! let store = UniverseStore::new();
//! store.create(universe)?;
//!
//! // The only sanctioned mutation path: version-checked
//! // read-modify-write.
//! store.update_and_save(id, |u| {
//!     u.details.root_ca = Some(new_cert);
//!     Ok(())
//! })?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod model;
pub mod prelude;
pub mod pricing;
pub mod rpc;
pub mod store;
pub mod testing;
pub mod types;

// Re-export key types at crate root for convenience
pub use error::{FlotillaError, Result};
pub use model::{TaskInfo, TaskState, TaskType, Universe, XClusterConfig, XClusterStatus};
pub use rpc::{AdminRpc, RpcError};
pub use store::{UniverseStore, XClusterStore};
pub use types::{TaskId, UniverseId, XClusterId};
