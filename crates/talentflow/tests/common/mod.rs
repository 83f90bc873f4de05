//! Shared test utilities for talentflow integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated runs over a temporary database
//! - `ConfigBuilder` for creating test configurations programmatically

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
