//! Test utilities shared across the jqlr workspace
//!
//! This crate provides common testing infrastructure including:
//! - XDG directory and environment variable isolation ([`EnvTestGuard`])
//! - Canned Jira search payloads ([`fixtures`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

// Re-export commonly used items
pub use env::EnvTestGuard;
pub use fixtures::{issue, search_response};
