//! Core types for Flotilla.
//!
//! This module provides the fundamental identifier types used throughout
//! the control plane:
//! - `UniverseId`: Identity of a managed cluster descriptor
//! - `TaskId`: Identity of one submitted orchestration task
//! - `XClusterId`: Identity of a cross-cluster replication config

mod ids;

pub use ids::{TaskId, UniverseId, XClusterId};
