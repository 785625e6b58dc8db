//! Consolidated test utilities for skillsmith
//!
//! This module provides unified testing utilities for integration tests,
//! built around real git repositories with an `.agent/` context directory.

pub mod assertions;
pub mod fixtures;
pub mod repository;
