//! Common test utilities for API integration tests
//!
//! This module provides shared test infrastructure for integration tests,
//! including fixtures over the in-memory repository and helpers to execute
//! GraphQL operations.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
