//! Test doubles and fixtures.
//!
//! This module provides the scripted collaborators the engine's tests are
//! built on:
//! - [`MockAdminRpc`]: an [`AdminRpc`](crate::rpc::AdminRpc)
//!   implementation with per-command scripted outcomes and a recorded
//!   call log for ordering assertions
//! - fixtures for seeding universes and replication configs
//!
//! It is compiled unconditionally (like the real/mock provider pairs it
//! is modeled on) so downstream crates can use it from their integration
//! tests.

mod fixtures;
mod mock_rpc;

pub use fixtures::{test_universe, test_xcluster, EXAMPLE_TABLE_IDS};
pub use mock_rpc::{MockAdminRpc, RpcCall};
